//! Side-channel tables built up while converting a document.
//!
//! Both tables are plain values owned by a single conversion (or handed in
//! by the caller), so parallel conversions never see each other's entries.

use std::collections::{HashMap, HashSet};

use crate::images::identifier_for;

/// Images referenced by converted markup, keyed by sanitized filename.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageImports {
    /// (filename, identifier) in first-seen order
    entries: Vec<(String, String)>,
    by_filename: HashMap<String, usize>,
    identifiers: HashSet<String>,
}

impl ImageImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the identifier for `filename`, assigning one on first sight.
    pub fn register(&mut self, filename: &str) -> &str {
        if let Some(&index) = self.by_filename.get(filename) {
            return &self.entries[index].1;
        }

        let base = identifier_for(filename);
        let mut identifier = base.clone();
        let mut suffix = 2;
        while self.identifiers.contains(&identifier) {
            identifier = format!("{base}{suffix}");
            suffix += 1;
        }

        self.identifiers.insert(identifier.clone());
        self.by_filename
            .insert(filename.to_string(), self.entries.len());
        self.entries.push((filename.to_string(), identifier));

        &self.entries[self.entries.len() - 1].1
    }

    /// Identifier previously assigned to `filename`.
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.by_filename
            .get(filename)
            .map(|&index| self.entries[index].1.as_str())
    }

    /// (filename, identifier) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, i)| (f.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one `import` line per image.
    pub fn to_import_statements(&self, images_dir: &str) -> String {
        let dir = images_dir.trim_matches('/');
        self.entries
            .iter()
            .map(|(filename, identifier)| {
                if dir.is_empty() {
                    format!("import {identifier} from './{filename}';\n")
                } else {
                    format!("import {identifier} from './{dir}/{filename}';\n")
                }
            })
            .collect()
    }
}

/// Custom properties lifted out of inline styles, one class per element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssVarTable {
    classes: Vec<(String, Vec<(String, String)>)>,
    next_id: usize,
}

impl CssVarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `declarations` under a freshly minted `<prefix>-N` class.
    pub fn mint(&mut self, prefix: &str, declarations: Vec<(String, String)>) -> String {
        self.next_id += 1;
        let class_name = format!("{prefix}-{}", self.next_id);
        self.classes.push((class_name.clone(), declarations));
        class_name
    }

    /// Declarations stored under `class_name`.
    pub fn get(&self, class_name: &str) -> Option<&[(String, String)]> {
        self.classes
            .iter()
            .find(|(name, _)| name == class_name)
            .map(|(_, decls)| decls.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(String, String)])> {
        self.classes
            .iter()
            .map(|(name, decls)| (name.as_str(), decls.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Render one rule block per class.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (class_name, declarations) in &self.classes {
            css.push('.');
            css.push_str(class_name);
            css.push_str(" {\n");
            for (property, value) in declarations {
                css.push_str(&format!("  {property}: {value};\n"));
            }
            css.push_str("}\n");
        }
        css
    }
}

/// Both side channels, threaded through one conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideTables {
    pub images: ImageImports,
    pub css_vars: CssVarTable,
}
