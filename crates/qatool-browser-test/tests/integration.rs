//! Integration tests driving a real Chrome instance.
//!
//! These require Chrome/Chromium on the machine and are `#[ignore]`d by
//! default. Run with: `cargo test --package qatool-browser-test -- --ignored`

use qatool_browser_test::{BrowserError, Selector, TestBrowser, TestBrowserConfig, WaitConfig};
use std::time::Duration;

/// A self-contained page with the interaction surface the driver needs to
/// prove: a labeled input, buttons that mutate a list, a CSS-only tooltip,
/// and an element that shows up late.
fn fixture_page() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <title>Fixture</title>
    <style>
        .tooltip { display: none; }
        .tip-target:hover + .tooltip { display: block; }
    </style>
</head>
<body>
    <h1>Item Manager</h1>
    <p id="status">Ready</p>
    <label for="item-name">Item name</label>
    <input id="item-name" type="text">
    <button id="add">Add item</button>
    <button id="clear">Clear items</button>
    <ul id="items"></ul>
    <span class="tip-target" title="More information">?</span>
    <div class="tooltip">Hover help text</div>
    <script>
        const input = document.getElementById('item-name');
        input.addEventListener('input', () => {
            input.dataset.mirror = input.value;
        });
        document.getElementById('add').addEventListener('click', () => {
            const li = document.createElement('li');
            li.textContent = input.value || 'unnamed';
            document.getElementById('items').appendChild(li);
        });
        document.getElementById('clear').addEventListener('click', () => {
            document.getElementById('items').innerHTML = '';
        });
        setTimeout(() => {
            const late = document.createElement('p');
            late.id = 'late';
            late.textContent = 'Arrived late';
            document.body.appendChild(late);
        }, 400);
        console.log('fixture ready');
    </script>
</body>
</html>"#
        .to_string()
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

async fn open_fixture() -> (TestBrowser, qatool_browser_test::Page) {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch browser");
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&fixture_page()))
        .await
        .expect("failed to navigate to fixture");
    (browser, page)
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn reads_wait_for_elements_added_later() {
    let (browser, page) = open_fixture().await;

    // #late is appended 400ms after load; the read must absorb that delay.
    let text = page
        .by_css("#late")
        .with_wait(WaitConfig::with_timeout(Duration::from_secs(5)))
        .inner_text()
        .await
        .expect("late element never appeared");
    assert_eq!(text, "Arrived late");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn click_mutates_the_list_and_plural_reads_see_it() {
    let (browser, page) = open_fixture().await;

    let input = page.by_css("#item-name");
    let add = page.by_role_named("button", "Add item");
    let items = page.by_role("listitem");

    assert_eq!(items.count().await.expect("count failed"), 0);

    input.fill("alpha").await.expect("fill failed");
    add.click().await.expect("click failed");
    input.fill("beta").await.expect("fill failed");
    add.click().await.expect("click failed");

    assert_eq!(items.count().await.expect("count failed"), 2);
    let texts = items.all_inner_texts().await.expect("texts failed");
    assert_eq!(texts, vec!["alpha", "beta"]);

    assert_eq!(items.first().inner_text().await.expect("first"), "alpha");
    assert_eq!(items.last().inner_text().await.expect("last"), "beta");
    assert_eq!(items.nth(-2).inner_text().await.expect("nth(-2)"), "alpha");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn fill_dispatches_input_events() {
    let (browser, page) = open_fixture().await;

    let input = page.by_css("#item-name");
    input.fill("hello").await.expect("fill failed");

    // The fixture mirrors the value into a data attribute from its own
    // input listener, so this only passes if the event actually fired.
    let mirrored = input
        .get_attribute("data-mirror")
        .await
        .expect("attribute read failed");
    assert_eq!(mirrored.as_deref(), Some("hello"));
    assert_eq!(input.input_value().await.expect("value"), "hello");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn hover_engages_css_hover_rules() {
    let (browser, page) = open_fixture().await;

    let tooltip = page.by_css(".tooltip");
    assert!(!tooltip.is_visible().await.expect("visibility probe"));

    page.by_css(".tip-target").hover().await.expect("hover failed");

    tooltip.wait_visible().await.expect("tooltip never appeared");
    assert_eq!(tooltip.inner_text().await.expect("text"), "Hover help text");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn role_and_text_selectors_resolve() {
    let (browser, page) = open_fixture().await;

    let heading = page.by_role_named("heading", "Item Manager");
    assert_eq!(heading.inner_text().await.expect("heading"), "Item Manager");

    // The input's accessible name comes from its <label for=..>.
    let named_input = page.by_role_named("textbox", "Item name");
    assert!(named_input.is_visible().await.expect("probe"));

    assert_eq!(
        page.by_text("Ready").inner_text().await.expect("text"),
        "Ready"
    );

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn focus_tracking_follows_interaction() {
    let (browser, page) = open_fixture().await;

    let input = page.by_css("#item-name");
    assert!(!input.is_focused().await.expect("probe"));

    input.fill("focus me").await.expect("fill failed");
    input.wait_focused().await.expect("input never focused");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn wait_hidden_covers_removal() {
    let (browser, page) = open_fixture().await;

    page.by_css("#item-name").fill("doomed").await.expect("fill");
    page.by_css("#add").click().await.expect("add");
    assert_eq!(page.by_role("listitem").count().await.expect("count"), 1);

    page.by_css("#clear").click().await.expect("clear");
    page.by_role("listitem")
        .wait_hidden()
        .await
        .expect("items never disappeared");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn wait_text_follows_mutations() {
    let (browser, page) = open_fixture().await;

    page.by_css("#item-name").fill("first").await.expect("fill");
    page.by_css("#add").click().await.expect("add");

    page.by_role("listitem")
        .last()
        .wait_text("first")
        .await
        .expect("text never matched");

    let short = WaitConfig::new(Duration::from_millis(200), Duration::from_millis(50));
    let miss = page
        .by_role("listitem")
        .last()
        .with_wait(short)
        .wait_text("never this")
        .await;
    assert!(matches!(miss, Err(BrowserError::WaitTimeout { .. })));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn missing_elements_fail_with_element_not_found() {
    let (browser, page) = open_fixture().await;

    let short = WaitConfig::new(Duration::from_millis(300), Duration::from_millis(50));
    let result = page.by_css("#nope").with_wait(short).click().await;

    match result {
        Err(BrowserError::ElementNotFound { selector, .. }) => {
            assert!(selector.contains("#nope"), "got selector {selector}");
        }
        other => panic!("expected ElementNotFound, got {other:?}"),
    }

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn hostile_selector_text_never_executes() {
    let (browser, page) = open_fixture().await;

    let hostile = page.locator(Selector::text(r#"'); console.error('injected'); ('"#));
    assert_eq!(hostile.count().await.expect("count"), 0);

    let also_hostile = page.by_css("#x` + console.error(`boom`) + `");
    let short = WaitConfig::new(Duration::from_millis(200), Duration::from_millis(50));
    let _ = also_hostile.with_wait(short).click().await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        page.console().error_count(),
        0,
        "injected text must stay inert data"
    );

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn console_capture_records_page_output() {
    let (browser, page) = open_fixture().await;

    tokio::time::sleep(Duration::from_millis(500)).await;

    let console = page.console();
    assert!(
        console
            .messages()
            .iter()
            .any(|m| m.text.contains("fixture ready")),
        "should capture the fixture's startup log"
    );

    console.clear();
    assert!(console.is_empty());

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn reload_lands_on_a_fresh_document() {
    let (browser, page) = open_fixture().await;

    page.by_css("#item-name").fill("ephemeral").await.expect("fill");
    page.by_css("#add").click().await.expect("add");
    assert_eq!(page.by_role("listitem").count().await.expect("count"), 1);

    page.reload().await.expect("reload failed");

    // Data URLs have no backend; everything client-side is gone again,
    // while the address and document stay the same.
    assert_eq!(page.by_role("listitem").count().await.expect("count"), 0);
    assert_eq!(
        page.by_css("#item-name").input_value().await.expect("value"),
        ""
    );
    assert_eq!(page.title().await.expect("title"), "Fixture");
    assert!(page.url().await.expect("url").starts_with("data:text/html"));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn screenshot_produces_png_bytes() {
    let (browser, page) = open_fixture().await;

    let shot = page.screenshot().await.expect("screenshot failed");
    assert!(!shot.is_empty());
    assert_eq!(&shot[0..4], &[0x89, 0x50, 0x4E, 0x47]);

    browser.close().await.expect("failed to close");
}
