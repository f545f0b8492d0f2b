//! Element selection strategies.
//!
//! A [`Selector`] describes how to find elements: a raw CSS selector, visible
//! text content, or an ARIA role with an optional accessible name. The
//! JavaScript in [`RESOLVER_JS`] implements the same semantics inside the
//! page; locator scripts embed it and hand over the selector as a JSON query
//! object, so user-supplied strings are never spliced into script source.

use serde_json::json;
use std::fmt;

/// How to find elements on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A raw CSS selector, matched with `querySelectorAll`.
    Css(String),

    /// The deepest elements whose text content contains the given string.
    ///
    /// Matching is case-insensitive and whitespace-normalized. Ancestors of a
    /// matching element are excluded, so `text("Remove")` finds the button
    /// and not every container around it.
    Text(String),

    /// Elements with a given ARIA role, optionally narrowed by accessible
    /// name.
    Role {
        /// Role to match, e.g. `button`, `heading` or `listitem`.
        role: String,

        /// Case-insensitive substring of the accessible name.
        name: Option<String>,
    },
}

impl Selector {
    /// Selects by raw CSS selector.
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Selects the deepest elements containing the given text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Selects by ARIA role.
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
        }
    }

    /// Selects by ARIA role and accessible name.
    #[must_use]
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: Some(name.into()),
        }
    }

    /// Serializes the selector into the query object [`RESOLVER_JS`]
    /// consumes.
    pub(crate) fn to_query(&self) -> serde_json::Value {
        match self {
            Self::Css(css) => json!({ "kind": "css", "css": css }),
            Self::Text(text) => json!({ "kind": "text", "text": text }),
            Self::Role { role, name } => json!({ "kind": "role", "role": role, "name": name }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css={css}"),
            Self::Text(text) => write!(f, "text=\"{text}\""),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name=\"{name}\"]"),
            Self::Role { role, name: None } => write!(f, "role={role}"),
        }
    }
}

/// In-page resolver: an arrow function from a query object to an array of
/// matching elements in document order.
///
/// Role queries map well-known roles to their implicit HTML elements and fall
/// back to an explicit `[role=...]` attribute match. The accessible name is
/// approximated from `aria-label`, an associated `<label>`, placeholder or
/// title, the value of `<input>` buttons, and finally text content.
pub(crate) const RESOLVER_JS: &str = r#"(q) => {
    const norm = (s) => (s || '').replace(/\s+/g, ' ').trim().toLowerCase();
    if (q.kind === 'css') {
        return Array.from(document.querySelectorAll(q.css));
    }
    if (q.kind === 'text') {
        const needle = norm(q.text);
        const matches = Array.from(document.querySelectorAll('*')).filter((el) =>
            el.tagName !== 'SCRIPT' &&
            el.tagName !== 'STYLE' &&
            norm(el.textContent).includes(needle));
        return matches.filter((el) => !matches.some((other) => other !== el && el.contains(other)));
    }
    const roleCss = {
        button: "button, input[type='button'], input[type='submit'], [role='button']",
        link: "a[href], [role='link']",
        heading: "h1, h2, h3, h4, h5, h6, [role='heading']",
        textbox: "input:not([type]), input[type='text'], input[type='search'], input[type='email'], input[type='url'], input[type='tel'], textarea, [role='textbox']",
        checkbox: "input[type='checkbox'], [role='checkbox']",
        list: "ul, ol, [role='list']",
        listitem: "li, [role='listitem']",
        img: "img, [role='img']",
    };
    const css = roleCss[q.role] || "[role='" + q.role + "']";
    const candidates = Array.from(document.querySelectorAll(css));
    if (q.name == null) {
        return candidates;
    }
    const accessibleName = (el) => {
        const aria = el.getAttribute('aria-label');
        if (aria) return aria;
        if (el.id) {
            const label = document.querySelector("label[for='" + CSS.escape(el.id) + "']");
            if (label) return label.textContent;
        }
        const wrapping = el.closest('label');
        if (wrapping) return wrapping.textContent;
        const hint = el.getAttribute('placeholder') || el.getAttribute('title');
        if (hint) return hint;
        if (el.tagName === 'INPUT') return el.value || '';
        return el.textContent;
    };
    const wanted = norm(q.name);
    return candidates.filter((el) => norm(accessibleName(el)).includes(wanted));
}"#;
