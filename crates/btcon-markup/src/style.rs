//! Applying and stripping markup.
//!
//! [`Styling`] is the styling context: when enabled, [`Styling::apply`] wraps
//! text in a start/end tag pair; when disabled, text passes through unchanged.
//! [`destyle`] strips markup from a string without building a tree, which is
//! how callers measure the visible width of styled text.
//!
//! A process-wide default exists for callers that do not thread a context
//! through their code ([`set_styling_enabled`], [`Styling::global`]). It is a
//! single atomic flag; toggling it while a render is in flight may yield a
//! render whose cells disagree about styling.

use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tree::start_tag;
use crate::END_TAG;

static GLOBAL_STYLING: AtomicBool = AtomicBool::new(false);

/// Start tags (shortest match up to the next `>`, newlines included) and end tags.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\+bt[^>]*>|<-bt>").expect("tag pattern is valid"));

/// Environment variable that forces styling on or off.
pub const STYLE_ENV_VAR: &str = "BTCON_STYLE";

/// Style applied to error lines when the caller passes no styles.
const DEFAULT_ERROR_STYLE: &str = "red";

/// Sets the process-wide styling default.
pub fn set_styling_enabled(enabled: bool) {
    GLOBAL_STYLING.store(enabled, Ordering::Relaxed);
}

/// Reads the process-wide styling default.
pub fn styling_enabled() -> bool {
    GLOBAL_STYLING.load(Ordering::Relaxed)
}

/// Whether markup is emitted.
///
/// # Example
///
/// ```rust
/// use btcon_markup::Styling;
///
/// assert_eq!(Styling::enabled().apply("hi", &["bold"]), "<+bt bold>hi<-bt>");
/// assert_eq!(Styling::disabled().apply("hi", &["bold"]), "hi");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Styling {
    #[serde(default)]
    enabled: bool,
}

impl Styling {
    pub fn new(enabled: bool) -> Self {
        Styling { enabled }
    }

    /// A context that emits markup.
    pub fn enabled() -> Self {
        Styling::new(true)
    }

    /// A context that passes text through untouched.
    pub fn disabled() -> Self {
        Styling::new(false)
    }

    /// Snapshot of the process-wide default.
    pub fn global() -> Self {
        Styling::new(styling_enabled())
    }

    /// Resolves styling from the environment.
    ///
    /// - `NO_COLOR` set to a non-empty value disables styling.
    /// - Otherwise `BTCON_STYLE` set to `1`/`true`/`yes`/`on` enables it and
    ///   `0`/`false`/`no`/`off` disables it.
    /// - Otherwise the process-wide default applies.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("NO_COLOR").ok().as_deref(),
            std::env::var(STYLE_ENV_VAR).ok().as_deref(),
        )
    }

    fn resolve(no_color: Option<&str>, style: Option<&str>) -> Self {
        if no_color.is_some_and(|v| !v.is_empty()) {
            return Styling::disabled();
        }
        match style.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("1" | "true" | "yes" | "on") => Styling::enabled(),
            Some("0" | "false" | "no" | "off") => Styling::disabled(),
            _ => Styling::global(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps `text` as `<+bt styles...>text<-bt>`, or returns it unchanged when disabled.
    pub fn apply<S: AsRef<str>>(&self, text: &str, styles: &[S]) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = start_tag(styles);
        out.push_str(text);
        out.push_str(END_TAG);
        out
    }

    /// Renders an error and its `source()` chain, styling every line.
    ///
    /// The error's own message comes first, followed by one `Caused by: ...`
    /// block per cause. Each output line ends with `\n`. Without explicit
    /// styles the lines are styled `red`.
    pub fn apply_error<S: AsRef<str>>(&self, err: &(dyn Error + 'static), styles: &[S]) -> String {
        let styles: Vec<&str> = if styles.is_empty() {
            vec![DEFAULT_ERROR_STYLE]
        } else {
            styles.iter().map(AsRef::as_ref).collect()
        };

        let mut out = String::new();
        let mut push_lines = |message: String| {
            for line in message.lines() {
                out.push_str(&self.apply(line, &styles));
                out.push('\n');
            }
        };

        push_lines(err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            push_lines(format!("Caused by: {cause}"));
            source = cause.source();
        }
        out
    }
}

/// Applies styles using the process-wide default.
pub fn apply<S: AsRef<str>>(text: &str, styles: &[S]) -> String {
    Styling::global().apply(text, styles)
}

/// Removes every start and end tag, leaving the visible text.
///
/// Idempotent: if removing tags splices a new tag together (as in
/// `<+<-bt>bt x>`), the pass repeats until no tag remains.
pub fn destyle(text: &str) -> String {
    let mut current = TAG_PATTERN.replace_all(text, "").into_owned();
    while TAG_PATTERN.is_match(&current) {
        current = TAG_PATTERN.replace_all(&current, "").into_owned();
    }
    current
}
