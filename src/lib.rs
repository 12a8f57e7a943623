//! Deterministic model of the TechGadget Store demo page.
//!
//! The page markup is parsed into a small DOM, its interactive elements are
//! bound once at load, and every user action flows through an explicit
//! view-model that is rendered back onto the DOM. Time is a fake clock that
//! only moves when the caller advances it.
//!
//! ```
//! use storefront_demo::{Storefront, Result};
//!
//! fn demo() -> Result<()> {
//!     let mut page = Storefront::new()?;
//!     page.click("#incrementBtn")?;
//!     page.assert_text("#counterValue", "1")?;
//!     page.advance_time(200)?;
//!     page.assert_style("#counterValue", "transform", "scale(1)")?;
//!     Ok(())
//! }
//! # demo().unwrap();
//! ```

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};

mod bindings;
mod dom;
mod html;
mod keyboard;
mod markup;
mod pattern;
mod render;
mod scheduler;
mod selector;
mod state;
mod storefront;
mod trace;
mod validation;

pub(crate) use bindings::*;
pub(crate) use dom::*;
pub(crate) use html::parse_html;
pub(crate) use pattern::{Pattern, PatternError};
pub(crate) use scheduler::*;
pub(crate) use state::*;
pub(crate) use trace::*;

pub use keyboard::legacy_key_code;
pub use markup::STOREFRONT_HTML;
pub use scheduler::PendingTimer;
pub use state::{CounterTone, Theme};
pub use storefront::Storefront;
pub use validation::{
    FormField, MESSAGE_MAX_LEN, PASSWORD_MIN_LEN, Validators, validate_message,
    validate_password,
};

/// Fixed delays used by the page, in milliseconds.
pub mod timing {
    pub const COUNTER_PULSE_MS: i64 = 200;
    pub const COUNTER_RESET_PULSE_MS: i64 = 300;
    pub const CART_HIGHLIGHT_MS: i64 = 300;
    pub const SUCCESS_BANNER_MS: i64 = 5000;
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    MissingElement(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    Regex(String),
    Timer(String),
    Config(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::MissingElement(what) => write!(f, "missing page element: {what}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::Regex(msg) => write!(f, "regex error: {msg}"),
            Self::Timer(msg) => write!(f, "timer error: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

impl From<PatternError> for Error {
    fn from(value: PatternError) -> Self {
        Self::Regex(value.to_string())
    }
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}

/// String length as a browser reports it (UTF-16 code units).
pub(crate) fn js_length(value: &str) -> usize {
    value.encode_utf16().count()
}
