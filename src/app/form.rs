//! Add-tile form overlay with arrow/Tab field navigation.

use crate::store::TileDraft;

/// Characters accepted per field; longer input is dropped.
const FIELD_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Label,
    Speak,
    Icon,
    Color,
}

pub const FORM_FIELDS: &[FormField] = &[
    FormField::Label,
    FormField::Speak,
    FormField::Icon,
    FormField::Color,
];

impl FormField {
    pub fn title(self) -> &'static str {
        match self {
            FormField::Label => "Label",
            FormField::Speak => "Speak",
            FormField::Icon => "Icon",
            FormField::Color => "Color",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Label => "required",
            FormField::Speak => "defaults to the label",
            FormField::Icon => "optional emoji",
            FormField::Color => "#152043",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTileForm {
    pub selected: usize,
    label: String,
    speak: String,
    icon: String,
    color: String,
}

impl AddTileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_field(&self) -> FormField {
        FORM_FIELDS
            .get(self.selected)
            .copied()
            .unwrap_or(FormField::Label)
    }

    pub fn move_up(&mut self) {
        if self.selected == 0 {
            self.selected = FORM_FIELDS.len().saturating_sub(1);
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if FORM_FIELDS.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % FORM_FIELDS.len();
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Label => &self.label,
            FormField::Speak => &self.speak,
            FormField::Icon => &self.icon,
            FormField::Color => &self.color,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Label => &mut self.label,
            FormField::Speak => &mut self.speak,
            FormField::Icon => &mut self.icon,
            FormField::Color => &mut self.color,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let value = self.value_mut(self.selected_field());
        if value.chars().count() < FIELD_MAX_CHARS {
            value.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.selected_field();
        self.value_mut(field).pop();
    }

    pub fn label_is_blank(&self) -> bool {
        self.label.trim().is_empty()
    }

    /// Raw field contents; trimming and defaults happen when the tile is stored.
    pub fn to_draft(&self) -> TileDraft {
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());
        TileDraft {
            label: self.label.clone(),
            speak: optional(&self.speak),
            color: optional(&self.color),
            icon: optional(&self.icon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_navigation_wraps_both_ways() {
        let mut form = AddTileForm::new();
        assert_eq!(form.selected_field(), FormField::Label);
        form.move_up();
        assert_eq!(form.selected_field(), FormField::Color);
        form.move_down();
        assert_eq!(form.selected_field(), FormField::Label);
        form.move_down();
        assert_eq!(form.selected_field(), FormField::Speak);
    }

    #[test]
    fn typing_targets_the_selected_field() {
        let mut form = AddTileForm::new();
        for ch in "Doc".chars() {
            form.push_char(ch);
        }
        form.move_down();
        form.push_char('x');
        form.backspace();
        form.backspace();
        assert_eq!(form.value(FormField::Label), "Doc");
        assert_eq!(form.value(FormField::Speak), "");
    }

    #[test]
    fn field_length_is_capped_and_controls_ignored() {
        let mut form = AddTileForm::new();
        form.push_char('\u{7}');
        for _ in 0..FIELD_MAX_CHARS + 10 {
            form.push_char('a');
        }
        assert_eq!(form.value(FormField::Label).chars().count(), FIELD_MAX_CHARS);
    }

    #[test]
    fn draft_leaves_empty_fields_unset() {
        let mut form = AddTileForm::new();
        form.push_char(' ');
        assert!(form.label_is_blank());
        form.push_char('A');
        let draft = form.to_draft();
        assert_eq!(draft.label, " A");
        assert_eq!(draft.speak, None);
        assert_eq!(draft.icon, None);
        assert_eq!(draft.color, None);
    }
}
