//! Prompt templates with `{name}` placeholders.
//!
//! A template is parsed once into literal and variable segments, and
//! rendering substitutes every variable in a single pass: a value that itself
//! contains `{question}` is inserted verbatim and never expanded. Write `{{`
//! or `}}` for literal braces.

use std::collections::HashMap;

use crate::error::{AssistantError, Result};

/// The recommendation prompt sent for every query.
pub const PRODUCT_PROMPT: &str = "\
You are a helpful product recommendation assistant. Based on the following product information, answer the user's question about products.

Available Products:
{context}

User Question: {question}

Please provide helpful and detailed information about the products that match the user's query. Include product names, descriptions, prices, and availability when relevant.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A parsed prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse a template.
    ///
    /// A `{` that does not start a valid `{identifier}` is kept literally.
    pub fn new(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(c) = rest.chars().next() {
            if rest.starts_with("{{") || rest.starts_with("}}") {
                literal.push(c);
                rest = &rest[2..];
                continue;
            }
            if c == '{' {
                if let Some(end) = rest.find('}') {
                    let name = &rest[1..end];
                    if is_identifier(name) {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        segments.push(Segment::Variable(name.to_string()));
                        rest = &rest[end + 1..];
                        continue;
                    }
                }
            }
            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Self { segments }
    }

    /// The variable names used by this template, in order of first use.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute `vars` into the template.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Template`] if a variable has no value.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    let value = vars.get(name.as_str()).ok_or_else(|| {
                        AssistantError::Template(format!("missing value for '{name}'"))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(PRODUCT_PROMPT)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
