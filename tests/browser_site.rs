//! Browser tests for the page script: lightbox and theme toggle.
//!
//! Run with: `cargo test --test browser_site -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, OnceLock};

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/browser/generated")
}

fn ensure_fixtures_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let bin = env!("CARGO_BIN_EXE_folio");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        let output_dir = generated_dir();
        if output_dir.exists() {
            std::fs::remove_dir_all(&output_dir).expect("failed to clean output dir");
        }

        let status = Command::new(bin)
            .args([
                "--root",
                root.join("fixtures/site").to_str().unwrap(),
                "build",
                "--output",
                output_dir.to_str().unwrap(),
            ])
            .status()
            .expect("failed to run folio");
        assert!(status.success(), "fixture generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load_page(name: &str) -> Arc<Tab> {
    ensure_fixtures_built();
    let tab = browser().new_tab().unwrap();
    let file = generated_dir().join(name);
    assert!(file.exists(), "missing: {}", file.display());

    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval(tab: &Tab, js: &str) -> Value {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .unwrap_or(Value::Null)
}

fn lightbox_open(tab: &Tab) -> bool {
    eval(tab, "document.getElementById('lightbox').classList.contains('open')")
        .as_bool()
        .unwrap_or(false)
}

fn open_first_photo(tab: &Tab) {
    eval(tab, "document.querySelector('[data-lightbox-src]').click()");
    assert!(lightbox_open(tab), "lightbox did not open");
}

// ---------------------------------------------------------------------------
// Lightbox
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn photo_click_opens_lightbox_with_caption() {
    let tab = load_page("index.html");
    assert!(!lightbox_open(&tab));

    open_first_photo(&tab);
    let src = eval(&tab, "document.getElementById('lightboxImage').getAttribute('src')");
    assert_eq!(src.as_str(), Some("./photos/Trip 2/old-town.jpg"));
    let caption = eval(&tab, "document.getElementById('lightboxCaption').textContent");
    assert_eq!(caption.as_str(), Some("Old town at dusk"));
}

#[test]
#[ignore]
fn escape_closes_and_clears() {
    let tab = load_page("index.html");
    open_first_photo(&tab);

    eval(
        &tab,
        "document.dispatchEvent(new KeyboardEvent('keydown', { key: 'Escape' }))",
    );
    assert!(!lightbox_open(&tab));
    let src = eval(&tab, "document.getElementById('lightboxImage').getAttribute('src')");
    assert!(src.is_null() || src.as_str() == Some(""), "src was {src}");
    let caption = eval(&tab, "document.getElementById('lightboxCaption').textContent");
    assert_eq!(caption.as_str(), Some(""));
}

#[test]
#[ignore]
fn backdrop_closes_but_content_does_not() {
    let tab = load_page("gallery-trip-2.html");
    open_first_photo(&tab);

    eval(&tab, "document.getElementById('lightboxCaption').click()");
    assert!(lightbox_open(&tab), "click on content closed the lightbox");

    eval(&tab, "document.getElementById('lightbox').click()");
    assert!(!lightbox_open(&tab));
}

#[test]
#[ignore]
fn close_button_closes() {
    let tab = load_page("gallery-trip-2.html");
    open_first_photo(&tab);
    eval(&tab, "document.getElementById('lightboxClose').click()");
    assert!(!lightbox_open(&tab));
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn theme_toggle_flips_and_persists() {
    let tab = load_page("index.html");
    eval(&tab, "localStorage.removeItem('theme')");
    tab.reload(false, None).unwrap().wait_until_navigated().unwrap();

    let system = eval(
        &tab,
        "window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light'",
    );
    let system = system.as_str().unwrap().to_string();
    let expected = if system == "dark" { "light" } else { "dark" };

    eval(&tab, "document.getElementById('themeToggle').click()");
    let theme = eval(&tab, "document.documentElement.getAttribute('data-theme')");
    assert_eq!(theme.as_str(), Some(expected));
    let stored = eval(&tab, "localStorage.getItem('theme')");
    assert_eq!(stored.as_str(), Some(expected));

    tab.reload(false, None).unwrap().wait_until_navigated().unwrap();
    let theme = eval(&tab, "document.documentElement.getAttribute('data-theme')");
    assert_eq!(theme.as_str(), Some(expected));

    eval(&tab, "localStorage.removeItem('theme')");
}
