//! Element handles that wait for the page to catch up.
//!
//! A [`Locator`] pairs a [`Selector`] with a position and a wait policy. It
//! re-resolves against the live DOM on every operation, so a handle created
//! before a re-render keeps working after one.
//!
//! Operations fall into three groups:
//!
//! - **Actions** (`click`, `fill`, `hover`) and **single-element reads**
//!   (`inner_text`, `input_value`, `get_attribute`) retry until a matching
//!   element exists -- actions additionally require it to be visible -- then
//!   check and act inside one script evaluation so the element cannot vanish
//!   between the check and the act. They fail with
//!   [`BrowserError::ElementNotFound`] when the deadline passes.
//! - **Plural reads** (`count`, `all_inner_texts`) observe the current DOM
//!   immediately; zero matches is a valid answer, not an error.
//! - **Probes** (`is_visible`, `is_focused`) report current state without
//!   waiting; the `wait_*` variants poll until the state is reached.

use crate::error::{BrowserError, Result};
use crate::selector::{Selector, RESOLVER_JS};
use crate::wait::{wait_for_result, WaitConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::page::Page as ChromePage;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tracing::debug;

/// In-page visibility test: laid out with nonzero size and not hidden via CSS.
const VISIBLE_JS: &str = "(el) => {
    const rect = el.getBoundingClientRect();
    const style = window.getComputedStyle(el);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}";

/// Envelope returned by every single-element script.
///
/// `found: false` means the element was absent (or not visible, for actions)
/// at this attempt; the caller polls again.
#[derive(Debug, Deserialize)]
struct OpOutcome {
    found: bool,
    #[serde(default)]
    value: serde_json::Value,
}

/// Screen coordinates of an element's center, used for mouse dispatch.
#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

/// A lazy, re-resolving handle to an element (or set of elements).
///
/// Created via `Page::locator()`. Cloning is cheap; refinements like
/// [`nth`](Locator::nth) return new handles and leave the original usable.
#[derive(Debug, Clone)]
pub struct Locator {
    page: Arc<ChromePage>,
    selector: Selector,
    nth: i64,
    wait: WaitConfig,
}

impl Locator {
    pub(crate) fn new(page: Arc<ChromePage>, selector: Selector, wait: WaitConfig) -> Self {
        Self {
            page,
            selector,
            nth: 0,
            wait,
        }
    }

    /// Targets the match at `index`, with `Array.prototype.at` semantics:
    /// negative indices count from the end of the match list.
    #[must_use]
    pub fn nth(&self, index: i64) -> Self {
        Self {
            nth: index,
            ..self.clone()
        }
    }

    /// Targets the first match. Equivalent to `nth(0)`, the default.
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Targets the last match. Equivalent to `nth(-1)`.
    #[must_use]
    pub fn last(&self) -> Self {
        self.nth(-1)
    }

    /// Returns a handle with a different wait policy.
    #[must_use]
    pub fn with_wait(&self, wait: WaitConfig) -> Self {
        Self {
            wait,
            ..self.clone()
        }
    }

    // ----- actions ---------------------------------------------------------

    /// Clicks the element once it is present and visible.
    ///
    /// The element is scrolled into view first, then clicked via the DOM
    /// `click()` method in the same evaluation that found it.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no visible match appeared within the
    /// wait deadline.
    pub async fn click(&self) -> Result<()> {
        debug!(selector = %self.selector, nth = self.nth, "click");
        let script = build_element_script(
            &self.selector,
            self.nth,
            true,
            "el.scrollIntoView({ block: 'center', inline: 'center' });\n    \
             el.click();\n    \
             return { found: true, value: null };",
        );
        self.run_element_op(&script).await?;
        Ok(())
    }

    /// Replaces the element's value with `text`.
    ///
    /// After setting `.value` the script dispatches bubbling `input` and
    /// `change` events; frontends that re-render from input events would
    /// otherwise never observe the new value.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no visible match appeared within the
    /// wait deadline.
    pub async fn fill(&self, text: &str) -> Result<()> {
        debug!(selector = %self.selector, nth = self.nth, chars = text.len(), "fill");
        let payload = serde_json::to_string(text)
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        let body = format!(
            "el.scrollIntoView({{ block: 'center' }});\n    \
             el.focus();\n    \
             el.value = {payload};\n    \
             el.dispatchEvent(new Event('input', {{ bubbles: true }}));\n    \
             el.dispatchEvent(new Event('change', {{ bubbles: true }}));\n    \
             return {{ found: true, value: null }};"
        );
        let script = build_element_script(&self.selector, self.nth, true, &body);
        self.run_element_op(&script).await?;
        Ok(())
    }

    /// Moves the mouse pointer over the element's center.
    ///
    /// This dispatches a real mouse move through the devtools input domain
    /// rather than synthesizing a `mouseover` event, so CSS `:hover` rules
    /// engage exactly as they would for a user.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no visible match appeared within the
    /// wait deadline, or a protocol error if the mouse event is rejected.
    pub async fn hover(&self) -> Result<()> {
        debug!(selector = %self.selector, nth = self.nth, "hover");
        let script = build_element_script(
            &self.selector,
            self.nth,
            true,
            "el.scrollIntoView({ block: 'center', inline: 'center' });\n    \
             const rect = el.getBoundingClientRect();\n    \
             return { found: true, value: { x: rect.left + rect.width / 2, y: rect.top + rect.height / 2 } };",
        );
        let value = self.run_element_op(&script).await?;
        let center: Point = serde_json::from_value(value)
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(center.x)
            .y(center.y)
            .build()
            .map_err(BrowserError::ScriptExecutionFailed)?;
        self.page.execute(params).await?;
        Ok(())
    }

    // ----- single-element reads --------------------------------------------

    /// Returns the element's rendered text (`innerText`).
    ///
    /// Waits for the element to be present; it does not have to be visible.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no match appeared within the wait
    /// deadline.
    pub async fn inner_text(&self) -> Result<String> {
        let script = build_element_script(
            &self.selector,
            self.nth,
            false,
            "return { found: true, value: el.innerText };",
        );
        let value = self.run_element_op(&script).await?;
        decode(value)
    }

    /// Returns the current value of an input or textarea.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no match appeared within the wait
    /// deadline.
    pub async fn input_value(&self) -> Result<String> {
        let script = build_element_script(
            &self.selector,
            self.nth,
            false,
            "return { found: true, value: el.value ?? '' };",
        );
        let value = self.run_element_op(&script).await?;
        decode(value)
    }

    /// Returns the value of an attribute, or `None` if the attribute is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no match appeared within the wait
    /// deadline.
    pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        let payload = serde_json::to_string(name)
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        let body = format!("return {{ found: true, value: el.getAttribute({payload}) }};");
        let script = build_element_script(&self.selector, self.nth, false, &body);
        let value = self.run_element_op(&script).await?;
        decode(value)
    }

    // ----- plural reads ----------------------------------------------------

    /// Returns how many elements currently match.
    ///
    /// Does not wait: an empty page answers `0` immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn count(&self) -> Result<usize> {
        let script = build_list_script(&self.selector, "return matches.length;");
        self.eval(&script).await
    }

    /// Returns the rendered text of every current match, in document order.
    ///
    /// Does not wait: an empty page answers an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn all_inner_texts(&self) -> Result<Vec<String>> {
        let script = build_list_script(&self.selector, "return matches.map((el) => el.innerText);");
        self.eval(&script).await
    }

    // ----- probes and state waits ------------------------------------------

    /// Reports whether the element is currently present and visible.
    ///
    /// Does not wait; an absent element is simply not visible.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn is_visible(&self) -> Result<bool> {
        let script = build_probe_script(&self.selector, self.nth, false, "visible(el)");
        self.eval(&script).await
    }

    /// Reports whether the element currently owns keyboard focus.
    ///
    /// Does not wait; an absent element is not focused.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn is_focused(&self) -> Result<bool> {
        let script = build_probe_script(&self.selector, self.nth, false, "document.activeElement === el");
        self.eval(&script).await
    }

    /// Waits until the element is present and visible.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element never became visible.
    pub async fn wait_visible(&self) -> Result<()> {
        let script = build_probe_script(&self.selector, self.nth, false, "visible(el)");
        self.wait_probe(script, format!("{} visible", self.selector))
            .await
    }

    /// Waits until the element is hidden or gone.
    ///
    /// An element that never existed counts as hidden, so this also waits
    /// out removal from the DOM.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the element stayed visible.
    pub async fn wait_hidden(&self) -> Result<()> {
        let script = build_probe_script(&self.selector, self.nth, true, "!visible(el)");
        self.wait_probe(script, format!("{} hidden", self.selector))
            .await
    }

    /// Waits until the element owns keyboard focus.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if focus never arrived.
    pub async fn wait_focused(&self) -> Result<()> {
        let script = build_probe_script(&self.selector, self.nth, false, "document.activeElement === el");
        self.wait_probe(script, format!("{} focused", self.selector))
            .await
    }

    /// Waits until the element's rendered text equals `expected`.
    ///
    /// Both sides are trimmed, so surrounding markup whitespace does not
    /// count against the match.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the text never matched.
    pub async fn wait_text(&self, expected: &str) -> Result<()> {
        let payload = serde_json::to_string(expected.trim())
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
        let predicate = format!("el.innerText.trim() === {payload}");
        let script = build_probe_script(&self.selector, self.nth, false, &predicate);
        self.wait_probe(script, format!("{} has text {expected:?}", self.selector))
            .await
    }

    // ----- plumbing --------------------------------------------------------

    /// Runs a single-element script until its envelope reports `found`.
    ///
    /// Evaluation errors are treated like "not found yet": navigations tear
    /// down the execution context mid-poll and the next attempt recovers.
    async fn run_element_op(&self, script: &str) -> Result<serde_json::Value> {
        let start = Instant::now();

        loop {
            match self.try_element_op(script).await {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => {}
                Err(e) => {
                    debug!(selector = %self.selector, error = %e, "element op failed, retrying");
                }
            }

            if start.elapsed() >= self.wait.timeout {
                return Err(BrowserError::ElementNotFound {
                    selector: self.selector.to_string(),
                    timeout: self.wait.timeout,
                });
            }

            sleep(self.wait.poll_interval).await;
        }
    }

    async fn try_element_op(&self, script: &str) -> Result<Option<serde_json::Value>> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        let outcome: OpOutcome = result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        Ok(outcome.found.then_some(outcome.value))
    }

    async fn eval<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    async fn wait_probe(&self, script: String, description: String) -> Result<()> {
        wait_for_result(
            || {
                let page = self.page.clone();
                let script = script.clone();
                async move {
                    let result = page
                        .evaluate(script.as_str())
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false))
                }
            },
            self.wait,
            &description,
        )
        .await
    }
}

fn decode<T>(value: serde_json::Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
}

/// Builds the check-and-act script for one element.
///
/// `body` runs with `el` in scope and must return the `{ found, value }`
/// envelope itself; absence (and invisibility, when required) short-circuits
/// to `{ found: false }` before the body runs.
fn build_element_script(selector: &Selector, nth: i64, require_visible: bool, body: &str) -> String {
    let query = selector.to_query();
    let guard = if require_visible {
        format!(
            "const visible = {VISIBLE_JS};\n    if (!visible(el)) {{ return {{ found: false }}; }}\n    "
        )
    } else {
        String::new()
    };

    format!(
        "(() => {{\n    \
         const resolve = {RESOLVER_JS};\n    \
         const matches = resolve({query});\n    \
         const el = matches.at({nth});\n    \
         if (!el) {{ return {{ found: false }}; }}\n    \
         {guard}{body}\n\
         }})()"
    )
}

/// Builds a script over the whole match list (`matches` in scope).
fn build_list_script(selector: &Selector, body: &str) -> String {
    let query = selector.to_query();
    format!(
        "(() => {{\n    \
         const resolve = {RESOLVER_JS};\n    \
         const matches = resolve({query});\n    \
         {body}\n\
         }})()"
    )
}

/// Builds a boolean probe over one element.
///
/// `missing` is the verdict when no element matches: a visibility probe
/// answers `false`, a hidden-check answers `true`.
fn build_probe_script(selector: &Selector, nth: i64, missing: bool, predicate: &str) -> String {
    let query = selector.to_query();
    format!(
        "(() => {{\n    \
         const resolve = {RESOLVER_JS};\n    \
         const matches = resolve({query});\n    \
         const el = matches.at({nth});\n    \
         if (!el) {{ return {missing}; }}\n    \
         const visible = {VISIBLE_JS};\n    \
         return {predicate};\n\
         }})()"
    )
}
