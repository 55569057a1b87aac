//! Inline `style` attribute model
//!
//! Parses `style="a: b; c: d"` into ordered declarations that can be read,
//! changed and written back.

use std::fmt;

/// Ordered list of CSS declarations from an inline `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Parses the value of a `style` attribute
    ///
    /// Declarations are separated by `;` outside quotes, parentheses and
    /// escapes. Property names are lowercased. Malformed declarations (no
    /// `:` or an empty name) are dropped. A repeated property keeps its
    /// last value.
    pub fn parse(attr: &str) -> Self {
        let mut style = Self::default();
        for declaration in split_declarations(attr) {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            style.set(name, value.trim());
        }
        style
    }

    /// Value of a property, `None` if unset
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a property, keeping its position if already present
    ///
    /// An empty value removes the property.
    pub fn set(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.remove(name);
            return;
        }
        let name = name.to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    /// Removes a property
    pub fn remove(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        self.declarations.retain(|(n, _)| *n != name);
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Splits a declaration block at its top-level semicolons
fn split_declarations(block: &str) -> Vec<&str> {
    let mut declarations = Vec::new();
    let mut start = 0;
    let mut quote = None;
    let mut depth = 0usize;
    let mut escaped = false;

    for (i, c) in block.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (c, Some(q)) if c == q => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) => quote = Some(c),
            ('(', None) => depth += 1,
            (')', None) => depth = depth.saturating_sub(1),
            (';', None) if depth == 0 => {
                declarations.push(&block[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    declarations.push(&block[start..]);
    declarations
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}
