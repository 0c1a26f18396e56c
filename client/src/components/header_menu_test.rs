use super::*;

#[test]
fn name_color_follows_theme() {
    assert_eq!(menu_text_color(true), "rgb(203, 213, 225)");
    assert_eq!(menu_text_color(false), "rgb(0, 0, 0)");
}

#[test]
fn initial_is_uppercased_first_letter() {
    assert_eq!(user_initial("admin User"), "A");
    assert_eq!(user_initial("  "), "");
}

#[test]
fn expand_icon_tracks_open_state() {
    assert_eq!(expand_icon(true), "expand_less");
    assert_eq!(expand_icon(false), "expand_more");
}

#[test]
fn only_outside_press_closes_open_menu() {
    assert!(closes_on_press(true, false));
    assert!(!closes_on_press(true, true));
    assert!(!closes_on_press(false, false));
    assert!(!closes_on_press(false, true));
}
