use alloc::string::String;

use rowwindow::{RenderTarget, RowSource, WindowedRowRenderer};

/// Text transforms a table can offer on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditAction {
    Uppercase,
    Lowercase,
    /// Upper-cases the first letter of each word and lower-cases the rest.
    Capitalize,
    Trim,
    Clear,
}

impl EditAction {
    pub const ALL: [Self; 5] = [
        Self::Uppercase,
        Self::Lowercase,
        Self::Capitalize,
        Self::Trim,
        Self::Clear,
    ];

    /// Stable identifier, suitable for menus and shortcut tables.
    pub fn id(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
            Self::Trim => "trim",
            Self::Clear => "clear",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Capitalize => capitalize(text),
            Self::Trim => String::from(text.trim()),
            Self::Clear => String::new(),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Applies `action` to `current` and writes the result into `field` of row `index`.
///
/// The write goes through [`WindowedRowRenderer::update_row`], so the row cache stays in step
/// with the live row. Returns what `update_row` returns.
pub fn apply_edit<S, T>(
    renderer: &mut WindowedRowRenderer<S, T>,
    index: usize,
    field: &str,
    current: &str,
    action: EditAction,
) -> bool
where
    S: RowSource,
    T: RenderTarget<S::Row>,
{
    let value = action.apply(current);
    adebug!(index, field, action = action.id(), "apply_edit");
    renderer.update_row(index, [(field, value.as_str())])
}
