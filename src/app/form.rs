use crate::layout::{LayoutParam, LayoutSettings};

/// Quiet time after the last keystroke before a field is committed.
const COMMIT_DELAY_SECS: f64 = 1.0;

/// Text-input state of the layout settings form.
///
/// Each field keeps what the user typed. An edit is committed once the
/// field has been left alone for [`COMMIT_DELAY_SECS`]; fields are debounced
/// independently, so edits to several fields all survive.
pub(in crate::app) struct SettingsForm {
    defaults: LayoutSettings,
    committed: LayoutSettings,
    inputs: [String; LayoutParam::COUNT],
    due_at: [Option<f64>; LayoutParam::COUNT],
    revision: u64,
}

impl SettingsForm {
    pub(in crate::app) fn new(defaults: LayoutSettings) -> Self {
        Self {
            defaults,
            committed: defaults,
            inputs: LayoutParam::ALL.map(|param| format_setting_value(defaults.get(param))),
            due_at: [None; LayoutParam::COUNT],
            revision: 0,
        }
    }

    pub(in crate::app) fn settings(&self) -> LayoutSettings {
        self.committed
    }

    /// Bumped whenever the committed settings are replaced.
    pub(in crate::app) fn revision(&self) -> u64 {
        self.revision
    }

    pub(in crate::app) fn input_mut(&mut self, param: LayoutParam) -> &mut String {
        &mut self.inputs[param.index()]
    }

    pub(in crate::app) fn mark_edited(&mut self, param: LayoutParam, now: f64) {
        self.due_at[param.index()] = Some(now + COMMIT_DELAY_SECS);
    }

    pub(in crate::app) fn is_pending(&self, param: LayoutParam) -> bool {
        self.due_at[param.index()].is_some()
    }

    pub(in crate::app) fn next_due(&self) -> Option<f64> {
        self.due_at.iter().flatten().copied().reduce(f64::min)
    }

    /// Commits every field whose delay has elapsed. Returns `true` when the
    /// committed settings changed.
    pub(in crate::app) fn poll(&mut self, now: f64) -> bool {
        let mut next = self.committed;
        for param in LayoutParam::ALL {
            let slot = &mut self.due_at[param.index()];
            if !slot.is_some_and(|due| due <= now) {
                continue;
            }
            *slot = None;

            let text = &self.inputs[param.index()];
            match parse_setting_value(text) {
                Some(value) => next.set(param, value),
                None => log::warn!("ignoring {} value {text:?}", param.key()),
            }
        }

        if next == self.committed {
            return false;
        }

        for param in LayoutParam::ALL {
            if next.get(param) != self.committed.get(param) {
                log::info!("{} set to {}", param.key(), next.get(param));
            }
        }
        self.committed = next;
        self.revision += 1;
        true
    }

    /// Restores the defaults, rewrites every input and drops pending edits.
    pub(in crate::app) fn reset(&mut self) {
        self.committed = self.defaults;
        for param in LayoutParam::ALL {
            self.inputs[param.index()] = format_setting_value(self.defaults.get(param));
        }
        self.due_at = [None; LayoutParam::COUNT];
        self.revision += 1;
        log::info!("layout settings reset to defaults");
    }
}

/// Number conversion of a form field, following JavaScript's `Number()`:
/// surrounding whitespace is ignored, an empty field reads as zero and
/// unsigned `0x`/`0o`/`0b` literals are accepted. Only finite, non-zero
/// values are usable; they are clamped into the non-zero `f32` range.
pub(in crate::app) fn parse_setting_value(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    let value = if trimmed.is_empty() {
        0.0
    } else {
        parse_number(trimmed)?
    };
    if !value.is_finite() || value == 0.0 {
        return None;
    }

    let magnitude = value
        .abs()
        .clamp(f64::from(f32::MIN_POSITIVE), f64::from(f32::MAX)) as f32;
    Some(if value < 0.0 { -magnitude } else { magnitude })
}

fn parse_number(text: &str) -> Option<f64> {
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let Some(digits) = text
            .get(..2)
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .and_then(|_| text.get(2..))
        else {
            continue;
        };
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, ch| {
            ch.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        });
    }
    text.parse().ok()
}

pub(in crate::app) fn format_setting_value(value: f32) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut SettingsForm, param: LayoutParam, text: &str, now: f64) {
        *form.input_mut(param) = text.to_owned();
        form.mark_edited(param, now);
    }

    #[test]
    fn inputs_start_from_defaults() {
        let form = SettingsForm::new(LayoutSettings::default());
        assert_eq!(form.inputs[LayoutParam::SpringLength.index()], "30");
        assert_eq!(form.inputs[LayoutParam::SpringCoeff.index()], "0.0008");
        assert_eq!(form.inputs[LayoutParam::Gravity.index()], "-1.2");
        assert_eq!(form.inputs[LayoutParam::TimeStep.index()], "20");
        assert_eq!(form.next_due(), None);
    }

    #[test]
    fn edit_commits_only_after_the_delay() {
        let mut form = SettingsForm::new(LayoutSettings::default());
        type_into(&mut form, LayoutParam::SpringLength, "45", 10.0);

        assert!(!form.poll(10.5));
        assert_eq!(form.settings().spring_length, 30.0);
        assert!(form.is_pending(LayoutParam::SpringLength));

        assert!(form.poll(11.0));
        assert_eq!(form.settings().spring_length, 45.0);
        assert_eq!(form.revision(), 1);
        assert!(!form.is_pending(LayoutParam::SpringLength));
    }

    #[test]
    fn each_keystroke_restarts_the_delay() {
        let mut form = SettingsForm::new(LayoutSettings::default());
        type_into(&mut form, LayoutParam::Theta, "0.", 0.0);
        type_into(&mut form, LayoutParam::Theta, "0.5", 0.75);

        assert!(!form.poll(1.25));
        assert_eq!(form.next_due(), Some(1.75));
        assert!(form.poll(1.75));
        assert_eq!(form.settings().theta, 0.5);
    }

    #[test]
    fn edits_to_different_fields_both_survive() {
        let mut form = SettingsForm::new(LayoutSettings::default());
        type_into(&mut form, LayoutParam::Gravity, "-3", 0.0);
        type_into(&mut form, LayoutParam::DragCoeff, "0.1", 0.5);

        assert!(form.poll(1.0));
        assert!(form.poll(1.5));
        let settings = form.settings();
        assert_eq!(settings.gravity, -3.0);
        assert_eq!(settings.drag_coeff, 0.1);
        assert_eq!(form.revision(), 2);
    }

    #[test]
    fn zero_empty_and_garbage_are_ignored() {
        let mut form = SettingsForm::new(LayoutSettings::default());
        for text in ["0", "", "   ", "abc", "NaN", "inf"] {
            type_into(&mut form, LayoutParam::SpringLength, text, 0.0);
            assert!(!form.poll(5.0), "{text:?} should not commit");
        }
        assert_eq!(form.settings(), LayoutSettings::default());
        assert_eq!(form.revision(), 0);
        assert_eq!(form.inputs[LayoutParam::SpringLength.index()], "inf");
    }

    #[test]
    fn unchanged_value_does_not_bump_revision() {
        let mut form = SettingsForm::new(LayoutSettings::default());
        type_into(&mut form, LayoutParam::TimeStep, " 20 ", 0.0);
        assert!(!form.poll(2.0));
        assert_eq!(form.revision(), 0);
    }

    #[test]
    fn reset_restores_defaults_and_cancels_pending_edits() {
        let defaults = LayoutSettings {
            spring_length: 60.0,
            ..LayoutSettings::default()
        };
        let mut form = SettingsForm::new(defaults);
        type_into(&mut form, LayoutParam::SpringLength, "90", 0.0);
        assert!(form.poll(1.0));
        type_into(&mut form, LayoutParam::Gravity, "-9", 1.5);

        form.reset();
        assert_eq!(form.settings(), defaults);
        assert_eq!(form.inputs[LayoutParam::SpringLength.index()], "60");
        assert_eq!(form.inputs[LayoutParam::Gravity.index()], "-1.2");
        assert_eq!(form.next_due(), None);
        assert!(!form.poll(10.0));
        assert_eq!(form.revision(), 2);
    }

    #[test]
    fn parses_numbers_like_a_form_field() {
        assert_eq!(parse_setting_value(" 12.5 "), Some(12.5));
        assert_eq!(parse_setting_value("-0.75"), Some(-0.75));
        assert_eq!(parse_setting_value("1e2"), Some(100.0));
        assert_eq!(parse_setting_value(".5"), Some(0.5));
        assert_eq!(parse_setting_value("0.0"), None);
        assert_eq!(parse_setting_value("12px"), None);
    }

    #[test]
    fn accepts_radix_literals_like_javascript_number() {
        assert_eq!(parse_setting_value("0x10"), Some(16.0));
        assert_eq!(parse_setting_value(" 0XfF "), Some(255.0));
        assert_eq!(parse_setting_value("0o17"), Some(15.0));
        assert_eq!(parse_setting_value("0b101"), Some(5.0));
        assert_eq!(parse_setting_value("0x0"), None);
        assert_eq!(parse_setting_value("0x"), None);
        assert_eq!(parse_setting_value("-0x10"), None);
        assert_eq!(parse_setting_value("0x+5"), None);
    }

    #[test]
    fn tiny_and_huge_values_stay_usable() {
        assert_eq!(parse_setting_value("1e-50"), Some(f32::MIN_POSITIVE));
        assert_eq!(parse_setting_value("-1e-50"), Some(-f32::MIN_POSITIVE));
        assert_eq!(parse_setting_value("1e300"), Some(f32::MAX));
        assert_eq!(parse_setting_value("1e400"), None);
    }
}
