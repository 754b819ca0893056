use super::*;

#[test]
fn full_chord_maps_a_through_m() {
    assert_eq!(resolve_shortcut(&Shortcut::chord('A')), Some(0));
    assert_eq!(resolve_shortcut(&Shortcut::chord('M')), Some(12));
    assert_eq!(resolve_shortcut(&Shortcut::chord('c')), Some(2));
}

#[test]
fn other_letters_and_partial_chords_are_ignored() {
    assert_eq!(resolve_shortcut(&Shortcut::chord('N')), None);
    assert_eq!(resolve_shortcut(&Shortcut::chord('1')), None);
    let mut s = Shortcut::chord('A');
    s.alt = false;
    assert_eq!(resolve_shortcut(&s), None);
}

#[test]
fn parse_and_display() {
    let s = Shortcut::parse("shift+Ctrl+alt+d").unwrap();
    assert_eq!(s, Shortcut::chord('d'));
    assert_eq!(s.to_string(), "Ctrl+Alt+Shift+D");
    assert_eq!(Shortcut::parse("Ctrl+A").map(|s| s.alt), Some(false));
    assert_eq!(Shortcut::parse("Ctrl+Alt"), None);
    assert_eq!(Shortcut::parse("Ctrl+AB"), None);
    assert_eq!(Shortcut::parse("A+B"), None);
}

#[test]
fn letters_by_slot() {
    assert_eq!(shortcut_letter(0), Some('A'));
    assert_eq!(shortcut_letter(12), Some('M'));
    assert_eq!(shortcut_letter(13), None);
}
