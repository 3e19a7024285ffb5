use serial_test::serial;
use tintline::{
    register_color, render, reset_global_palette, set_global_fallback, sgr, ColorSpec, Formatter,
    Value,
};

#[test]
#[serial]
fn test_registered_color_used_by_global_formatter() {
    reset_global_palette();
    register_color("brand", ColorSpec::rgb(255, 107, 53));

    let out = render(&[Value::from("[hi].brand")], &[], false);
    assert_eq!(out, format!("\x1b[38;2;255;107;53mhi{}", sgr::RESET));

    reset_global_palette();
}

#[test]
#[serial]
fn test_formatter_keeps_its_snapshot() {
    reset_global_palette();
    let before = Formatter::global();
    register_color("brand", ColorSpec::rgb(1, 2, 3));

    // the earlier formatter still resolves the unknown name to the fallback
    let out = before.render(&[Value::from("[x].brand")], &[], false);
    assert_eq!(out, format!("\x1b[38;2;255;255;255mx{}", sgr::RESET));

    reset_global_palette();
}

#[test]
#[serial]
fn test_global_fallback() {
    reset_global_palette();
    set_global_fallback(ColorSpec::rgb(10, 20, 30));

    let out = render(&[Value::from("[x].nosuch")], &[], false);
    assert_eq!(out, format!("\x1b[38;2;10;20;30mx{}", sgr::RESET));

    reset_global_palette();
}
