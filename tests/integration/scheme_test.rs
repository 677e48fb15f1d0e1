//! Library-level tests for colours, schemes and paths

use tintrace::color::rgb_from_xterm;
use tintrace::{parse_color, parse_colorscheme, Color, ColorPalette, ColorRole, ColorScheme, PathElider};

#[test]
fn every_palette_entry_maps_back_to_itself() {
    let palette = ColorPalette::global();
    for (index, rgb) in palette.iter() {
        assert_eq!(palette.xterm_from_rgb(rgb), index, "index {index}");
        assert_eq!(rgb_from_xterm(index), Some(rgb));
    }
}

#[test]
fn descriptors_resolve_to_escape_codes() {
    let cases = [
        ("red", "\x1b[31m"),
        ("darkred", "\x1b[0;31m"),
        ("lightred", "\x1b[1;31m"),
        ("boldgreen", "\x1b[1;32m"),
        ("default", "\x1b[0m"),
        ("0", "\x1b[38;5;0m"),
        ("255", "\x1b[38;5;255m"),
        ("rgb(00ff00)", "\x1b[38;5;46m"),
    ];
    for (descriptor, code) in cases {
        let color = parse_color(descriptor).unwrap();
        assert_eq!(color.terminal_code(), code, "{descriptor}");
    }
}

#[test]
fn colorscheme_overrides_only_named_roles() {
    let (scheme, warnings) = ColorScheme::default().with_overrides("failure=red,pass=45");

    assert!(warnings.is_empty());
    assert_eq!(scheme.color(ColorRole::Failure), Color::ansi16(Some(1), None));
    assert_eq!(scheme.color(ColorRole::Pass), Color::xterm256(45));
    assert_eq!(
        scheme.color(ColorRole::Filename),
        ColorScheme::default().color(ColorRole::Filename)
    );
}

#[test]
fn colorscheme_parsing_is_strict_and_merging_lenient() {
    assert!(parse_colorscheme("failure=red,pass").is_err());

    let (scheme, warnings) = ColorScheme::default().with_overrides("failure=red,pass,bogus=blue");
    assert_eq!(warnings.len(), 2);
    assert_eq!(scheme.color(ColorRole::Failure), Color::ansi16(Some(1), None));
}

#[test]
fn elider_keeps_local_paths_and_hides_foreign_ones() {
    let elider = PathElider::new("/work/project");

    assert_eq!(
        elider.elide("/work/project/src/a.py", "3"),
        ("src/a.py".to_string(), "3".to_string())
    );
    assert_eq!(
        elider.elide("/opt/lib/b.py", "9"),
        (".../b.py".to_string(), "...".to_string())
    );
}
