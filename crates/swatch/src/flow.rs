//! Step-to-step navigation. Each step owns its local state; data moves forward
//! only as an immutable parameter bundle handed to the next step when it is pushed.

use crate::compose::{self, StyleGuide};
use crate::material::MaterialName;
use crate::pending::{Completion, DelayedTask, Ticket};
use crate::picker::ColorPicker;
use crate::profile::{Complexion, Field, Measurement, MeasurementError, SkinTone};
use crate::wheel::WheelLayout;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Route {
    Landing,
    Entry,
    Picker,
    Result,
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("{0} is required")]
    Incomplete(Field),
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

#[derive(Debug, Error, PartialEq)]
pub enum NavigationError {
    #[error("Expected to be on the {expected} step, but on {actual}")]
    WrongStep { expected: Route, actual: Route },
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error("Already at the first step")]
    AtRoot,
}

/// Entry → Picker bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryParams {
    pub height_cm: String,
    pub weight_kg: String,
    pub skin_tone: Complexion,
}

impl EntryParams {
    /// Height as a number. Unparseable text becomes NaN, which composes as average height.
    pub fn height_value(&self) -> f64 {
        self.height_cm.trim().parse().unwrap_or(f64::NAN)
    }
}

/// Picker → Result bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultParams {
    pub entry: EntryParams,
    pub color_hex: String,
    pub material_name: MaterialName,
}

impl ResultParams {
    pub fn style_guide(&self) -> StyleGuide {
        compose::compose(
            self.entry.height_value(),
            &self.entry.skin_tone,
            &self.color_hex,
            self.material_name.as_str(),
        )
    }

    /// Read-only profile rows shown above the recommendation.
    pub fn profile_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Height", format!("{} cm", self.entry.height_cm)),
            ("Weight", format!("{} kg", self.entry.weight_kg)),
            ("Skin Tone", self.entry.skin_tone.label().to_string()),
            ("Color", self.color_hex.clone()),
            ("Material", self.material_name.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub height: String,
    pub weight: String,
    pub skin_tone: Option<SkinTone>,
}

impl EntryForm {
    /// Whether the continue button is enabled.
    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none() && Measurement::parse(&self.height, &self.weight).is_ok()
    }

    fn first_missing(&self) -> Option<Field> {
        if self.height.trim().is_empty() {
            Some(Field::Height)
        } else if self.weight.trim().is_empty() {
            Some(Field::Weight)
        } else if self.skin_tone.is_none() {
            Some(Field::SkinTone)
        } else {
            None
        }
    }

    pub fn submit(&self) -> Result<EntryParams, EntryError> {
        if let Some(field) = self.first_missing() {
            return Err(EntryError::Incomplete(field));
        }
        Measurement::parse(&self.height, &self.weight)?;
        let skin_tone = self
            .skin_tone
            .ok_or(EntryError::Incomplete(Field::SkinTone))?;

        Ok(EntryParams {
            height_cm: self.height.trim().to_string(),
            weight_kg: self.weight.trim().to_string(),
            skin_tone: Complexion::Known(skin_tone),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationStatus {
    Loading(Ticket),
    Ready(String),
}

#[derive(Debug)]
pub struct ResultScreen {
    pub params: ResultParams,
    pub status: RecommendationStatus,
    task: Option<DelayedTask>,
}

#[derive(Debug)]
pub enum Screen {
    Landing,
    Entry(EntryForm),
    Picker {
        params: EntryParams,
        picker: ColorPicker,
    },
    Result(ResultScreen),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Self::Landing => Route::Landing,
            Self::Entry(_) => Route::Entry,
            Self::Picker { .. } => Route::Picker,
            Self::Result(_) => Route::Result,
        }
    }
}

/// Back stack of steps. Popping a step drops its state, including any pending task.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
    layout: WheelLayout,
    last_ticket: Ticket,
}

impl Navigator {
    pub fn new(layout: WheelLayout) -> Self {
        Self {
            stack: vec![Screen::Landing],
            layout,
            last_ticket: Ticket::default(),
        }
    }

    pub fn current(&self) -> &Screen {
        // the root step is never popped
        &self.stack[self.stack.len() - 1]
    }

    pub fn route(&self) -> Route {
        self.current().route()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Applies to pickers pushed from now on.
    pub fn set_layout(&mut self, layout: WheelLayout) {
        self.layout = layout;
    }

    fn require(&self, expected: Route) -> Result<(), NavigationError> {
        let actual = self.route();
        if actual == expected {
            Ok(())
        } else {
            Err(NavigationError::WrongStep { expected, actual })
        }
    }

    pub fn start(&mut self) -> Result<(), NavigationError> {
        self.require(Route::Landing)?;
        self.stack.push(Screen::Entry(EntryForm::default()));
        Ok(())
    }

    pub fn entry(&self) -> Option<&EntryForm> {
        match self.current() {
            Screen::Entry(form) => Some(form),
            _ => None,
        }
    }

    pub fn entry_mut(&mut self) -> Option<&mut EntryForm> {
        match self.stack.last_mut() {
            Some(Screen::Entry(form)) => Some(form),
            _ => None,
        }
    }

    pub fn picker(&self) -> Option<&ColorPicker> {
        match self.current() {
            Screen::Picker { picker, .. } => Some(picker),
            _ => None,
        }
    }

    pub fn picker_mut(&mut self) -> Option<&mut ColorPicker> {
        match self.stack.last_mut() {
            Some(Screen::Picker { picker, .. }) => Some(picker),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ResultScreen> {
        match self.current() {
            Screen::Result(screen) => Some(screen),
            _ => None,
        }
    }

    /// Entry → Picker, gated on a complete and numeric form.
    pub fn continue_to_picker(&mut self) -> Result<(), NavigationError> {
        let params = match self.current() {
            Screen::Entry(form) => form.submit()?,
            other => {
                return Err(NavigationError::WrongStep {
                    expected: Route::Entry,
                    actual: other.route(),
                });
            }
        };
        self.stack.push(Screen::Picker {
            params,
            picker: ColorPicker::new(self.layout.clone()),
        });
        Ok(())
    }

    /// Picker → Result. The caller schedules the delayed composition for the returned
    /// ticket and hands the task back through [`attach_task`](Self::attach_task).
    pub fn recommend(&mut self) -> Result<(Ticket, ResultParams), NavigationError> {
        let params = match self.current() {
            Screen::Picker { params, picker } => ResultParams {
                entry: params.clone(),
                color_hex: picker.current_color().to_string(),
                material_name: picker.material_or_default(),
            },
            other => {
                return Err(NavigationError::WrongStep {
                    expected: Route::Picker,
                    actual: other.route(),
                });
            }
        };
        self.last_ticket = self.last_ticket.next();
        let ticket = self.last_ticket;
        self.stack.push(Screen::Result(ResultScreen {
            params: params.clone(),
            status: RecommendationStatus::Loading(ticket),
            task: None,
        }));
        Ok((ticket, params))
    }

    /// Ties a running task to the result step it was scheduled for. A task for a step that
    /// is already gone is dropped, which aborts it.
    pub fn attach_task(&mut self, task: DelayedTask) {
        if let Some(Screen::Result(screen)) = self.stack.last_mut()
            && screen.status == RecommendationStatus::Loading(task.ticket())
        {
            screen.task = Some(task);
        }
    }

    /// Returns false when the completion belongs to a step that is no longer showing.
    pub fn deliver(&mut self, completion: Completion) -> bool {
        match self.stack.last_mut() {
            Some(Screen::Result(screen))
                if screen.status == RecommendationStatus::Loading(completion.ticket) =>
            {
                screen.status = RecommendationStatus::Ready(completion.text);
                screen.task = None;
                true
            }
            _ => {
                log::debug!("Discarding stale recommendation {:?}", completion.ticket);
                false
            }
        }
    }

    pub fn back(&mut self) -> Result<Route, NavigationError> {
        if self.stack.len() <= 1 {
            return Err(NavigationError::AtRoot);
        }
        self.stack.pop();
        Ok(self.route())
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(WheelLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{color_advice, height_advice};
    use crate::profile::{HeightCategory, ToneBucket};
    use crate::wheel::WheelCell;

    fn fill_entry(nav: &mut Navigator, height: &str, weight: &str, tone: Option<SkinTone>) {
        let form = nav.entry_mut().unwrap();
        form.height = height.to_string();
        form.weight = weight.to_string();
        form.skin_tone = tone;
    }

    fn nav_at_picker() -> Navigator {
        let mut nav = Navigator::default();
        nav.start().unwrap();
        fill_entry(&mut nav, "165", "60", Some(SkinTone::Fair));
        nav.continue_to_picker().unwrap();
        nav
    }

    #[test]
    fn test_entry_gate_requires_every_field() {
        let mut nav = Navigator::default();
        nav.start().unwrap();

        fill_entry(&mut nav, "", "60", Some(SkinTone::Fair));
        assert_eq!(
            nav.continue_to_picker().unwrap_err(),
            NavigationError::Entry(EntryError::Incomplete(Field::Height))
        );

        fill_entry(&mut nav, "165", "60", None);
        assert!(!nav.entry_mut().unwrap().is_complete());
        assert_eq!(
            nav.continue_to_picker().unwrap_err(),
            NavigationError::Entry(EntryError::Incomplete(Field::SkinTone))
        );
        assert_eq!(nav.route(), Route::Entry);
    }

    #[test]
    fn test_entry_gate_rejects_non_numeric() {
        let mut nav = Navigator::default();
        nav.start().unwrap();
        fill_entry(&mut nav, "tall", "60", Some(SkinTone::Fair));
        assert!(matches!(
            nav.continue_to_picker(),
            Err(NavigationError::Entry(EntryError::Measurement(
                MeasurementError::NotANumber { .. }
            )))
        ));
    }

    #[test]
    fn test_wrong_step_is_an_error() {
        let mut nav = Navigator::default();
        assert_eq!(
            nav.recommend().unwrap_err(),
            NavigationError::WrongStep {
                expected: Route::Picker,
                actual: Route::Landing
            }
        );
        assert_eq!(nav.back().unwrap_err(), NavigationError::AtRoot);
    }

    #[test]
    fn test_end_to_end_fair_average_silk() {
        let mut nav = nav_at_picker();
        let picker = nav.picker_mut().unwrap();
        let centroid = picker.layout().segment(WheelCell::new(0, 0)).centroid();
        assert!(picker.on_tap(centroid));
        picker.select_material(MaterialName::from("Silk"));

        let (ticket, params) = nav.recommend().unwrap();
        assert_eq!(params.color_hex, "#FFCCCC");
        assert_eq!(nav.route(), Route::Result);
        assert_eq!(
            nav.result().unwrap().status,
            RecommendationStatus::Loading(ticket)
        );

        let text = params.style_guide().to_string();
        assert!(nav.deliver(Completion { ticket, text }));

        let RecommendationStatus::Ready(text) = &nav.result().unwrap().status else {
            panic!("recommendation not ready");
        };
        assert!(text.contains(color_advice(ToneBucket::Soft)));
        assert!(text.contains(height_advice(HeightCategory::Average)));
        for line in ["#FFCCCC Silk top", "#FFCCCC Silk shirt", "#FFCCCC Silk piece"] {
            assert!(text.contains(line), "missing {line}");
        }

        let rows = nav.result().unwrap().params.profile_rows();
        assert_eq!(rows[0], ("Height", "165 cm".to_string()));
        assert_eq!(rows[2], ("Skin Tone", "Fair".to_string()));
    }

    #[test]
    fn test_unpicked_material_forwards_sentinel() {
        let mut nav = nav_at_picker();
        let (_, params) = nav.recommend().unwrap();
        assert_eq!(params.material_name.as_str(), "Not selected");
        assert_eq!(params.color_hex, "#FF0000");
    }

    #[test]
    fn test_back_keeps_earlier_steps() {
        let mut nav = nav_at_picker();
        nav.picker_mut().unwrap().on_hex_text_change("#AABBCC");
        nav.recommend().unwrap();

        assert_eq!(nav.back(), Ok(Route::Picker));
        assert_eq!(nav.picker().unwrap().hex_text(), "#AABBCC");

        assert_eq!(nav.back(), Ok(Route::Entry));
        let form = nav.entry_mut().unwrap();
        assert_eq!(form.height, "165");
        assert_eq!(form.skin_tone, Some(SkinTone::Fair));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut nav = nav_at_picker();
        let (stale, params) = nav.recommend().unwrap();
        nav.back().unwrap();

        let completion = Completion {
            ticket: stale,
            text: params.style_guide().to_string(),
        };
        assert!(!nav.deliver(completion.clone()));
        assert_eq!(nav.route(), Route::Picker);

        let (fresh, _) = nav.recommend().unwrap();
        assert_ne!(fresh, stale);
        assert!(!nav.deliver(completion));
        assert_eq!(
            nav.result().unwrap().status,
            RecommendationStatus::Loading(fresh)
        );
    }

    #[test]
    fn test_non_numeric_height_in_bundle_composes_as_average() {
        let params = ResultParams {
            entry: EntryParams {
                height_cm: "abc".to_string(),
                weight_kg: "60".to_string(),
                skin_tone: Complexion::Known(SkinTone::Deep),
            },
            color_hex: "#000000".to_string(),
            material_name: MaterialName::from("Wool"),
        };
        assert_eq!(params.style_guide().height_category, HeightCategory::Average);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_aborts_attached_task() {
        use crate::pending::{DEFAULT_DELAY, deliver_after};
        use std::time::Duration;

        let mut nav = nav_at_picker();
        let (tx, rx) = async_channel::unbounded();
        let (ticket, params) = nav.recommend().unwrap();
        let handle = tokio::spawn(deliver_after(DEFAULT_DELAY, ticket, params, tx));
        nav.attach_task(DelayedTask::new(ticket, handle));

        nav.back().unwrap();
        let result = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(!matches!(result, Ok(Ok(_))));
    }
}
