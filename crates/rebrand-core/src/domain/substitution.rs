//! Ordered literal substitutions derived from an identifier pair.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::identifier::{Identifier, IdentifierForm};

/// One literal `from → to` replacement for a single identifier form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub form: IdentifierForm,
    pub from: String,
    pub to: String,
}

impl Substitution {
    /// A substitution that maps a string onto itself never changes content.
    pub fn is_inert(&self) -> bool {
        self.from == self.to
    }

    /// Replace every occurrence in `text`, returning the new text and the
    /// number of occurrences replaced.
    pub fn apply(&self, text: &str) -> (String, usize) {
        if self.is_inert() {
            return (text.to_owned(), 0);
        }
        let count = text.matches(self.from.as_str()).count();
        if count == 0 {
            return (text.to_owned(), 0);
        }
        (text.replace(self.from.as_str(), &self.to), count)
    }
}

/// The four substitutions, in the fixed order dotted → path → linkage →
/// display name. Each runs on the output of the one before.
///
/// When the display name is also a substring of a derived form, the later
/// substitution sees the earlier one's output; last applied wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPlan {
    steps: Vec<Substitution>,
}

impl SubstitutionPlan {
    pub fn new(from: &Identifier, to: &Identifier) -> Self {
        let steps = IdentifierForm::ALL
            .iter()
            .map(|&form| Substitution {
                form,
                from: from.render(form),
                to: to.render(form),
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[Substitution] {
        &self.steps
    }

    /// `true` when every step maps a form onto itself.
    pub fn is_identity(&self) -> bool {
        self.steps.iter().all(Substitution::is_inert)
    }

    /// Apply all steps in order.
    pub fn apply(&self, text: &str) -> Rewritten {
        let mut content = text.to_owned();
        let mut counts = FormCounts::default();

        for step in &self.steps {
            let (next, count) = step.apply(&content);
            counts.add(step.form, count);
            content = next;
        }

        Rewritten { content, counts }
    }
}

/// Output of [`SubstitutionPlan::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub content: String,
    pub counts: FormCounts,
}

/// Occurrence counts keyed by identifier form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormCounts(BTreeMap<IdentifierForm, usize>);

impl FormCounts {
    /// Count each form of `identifier` in `text` independently.
    ///
    /// Overlapping forms are counted once per form (for a single-segment id
    /// the dotted, path and linkage forms coincide).
    pub fn occurrences(identifier: &Identifier, text: &str) -> Self {
        let mut counts = Self::default();
        for form in IdentifierForm::ALL {
            let needle = identifier.render(form);
            counts.add(form, text.matches(needle.as_str()).count());
        }
        counts
    }

    pub fn add(&mut self, form: IdentifierForm, count: usize) {
        if count > 0 {
            *self.0.entry(form).or_default() += count;
        }
    }

    pub fn get(&self, form: IdentifierForm) -> usize {
        self.0.get(&form).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IdentifierForm, usize)> + '_ {
        self.0.iter().map(|(form, count)| (*form, *count))
    }
}
