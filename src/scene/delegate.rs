//! Hover delegation at a single root: match the hovered element or its closest ancestor
//! against a selector list instead of binding listeners per element.

use crate::foundation::error::{GlideError, GlideResult};

/// Selector list of the interactive elements that grow the cursor.
pub const INTERACTIVE_SELECTORS: &str = "a, button, .hover-trigger, input";

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElementInfo {
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ElementInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A compound selector: optional tag plus required classes (`a`, `.x`, `button.x.y`).
#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(src: &str) -> GlideResult<Self> {
        let src = src.trim();
        if src.is_empty() {
            return Err(GlideError::config("empty selector"));
        }
        let mut parts = src.split('.');
        let tag = parts.next().unwrap_or_default();
        let valid = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        if !tag.is_empty() && !valid(tag) {
            return Err(GlideError::config(format!("unsupported selector `{src}`")));
        }
        let classes = parts
            .map(|c| {
                if valid(c) {
                    Ok(c.to_owned())
                } else {
                    Err(GlideError::config(format!("unsupported selector `{src}`")))
                }
            })
            .collect::<GlideResult<Vec<_>>>()?;
        Ok(Self {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            classes,
        })
    }

    fn matches(&self, el: &ElementInfo) -> bool {
        self.tag
            .as_deref()
            .is_none_or(|t| t.eq_ignore_ascii_case(&el.tag))
            && self.classes.iter().all(|c| el.has_class(c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    compounds: Vec<Compound>,
}

impl SelectorList {
    pub fn parse(src: &str) -> GlideResult<Self> {
        let compounds = src
            .split(',')
            .map(Compound::parse)
            .collect::<GlideResult<Vec<_>>>()?;
        Ok(Self { compounds })
    }

    pub fn interactive() -> Self {
        Self::parse(INTERACTIVE_SELECTORS).unwrap_or(Self {
            compounds: Vec::new(),
        })
    }

    pub fn matches(&self, el: &ElementInfo) -> bool {
        self.compounds.iter().any(|c| c.matches(el))
    }

    /// Index into `path` (hovered element first, then its ancestors) of the closest match.
    pub fn closest(&self, path: &[ElementInfo]) -> Option<usize> {
        path.iter().position(|el| self.matches(el))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/delegate.rs"]
mod tests;
