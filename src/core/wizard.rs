//! Booking wizard controller.
//!
//! The wizard walks a fixed list of steps over one [`BookingDraft`]. The
//! measurements step opens a separate capture sub-flow when the draft has no
//! measurements yet; that sub-flow is a phase of its own rather than a step
//! index, so the current position always names something the host can render.

use std::fmt;

use crate::config::Config;
use crate::core::gateway::OrderGateway;
use crate::core::services::draft_service::{DraftService, DraftUpdate};
use crate::domain::{BookingDraft, BookingSummary, MeasurementCategory, MeasurementForm, Route};
use crate::errors::{BookingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Details,
    Fabric,
    Schedule,
    Measurements,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Details,
        WizardStep::Fabric,
        WizardStep::Schedule,
        WizardStep::Measurements,
        WizardStep::Review,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Details => 0,
            WizardStep::Fabric => 1,
            WizardStep::Schedule => 2,
            WizardStep::Measurements => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<WizardStep> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Details => "Design details",
            WizardStep::Fabric => "Fabric",
            WizardStep::Schedule => "Schedule",
            WizardStep::Measurements => "Measurements",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the wizard currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardPhase {
    Step(WizardStep),
    CapturingMeasurements(MeasurementForm),
    Submitted { order_id: String },
    Exited,
}

/// Outcome of a `next`/`back` call, for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced(WizardStep),
    Retreated(WizardStep),
    OpenMeasurements(Route),
    Submitted(Route),
    Exit,
}

pub struct BookingWizard {
    service_id: String,
    tailor_id: String,
    draft: BookingDraft,
    drafts: DraftService,
    phase: WizardPhase,
}

impl BookingWizard {
    pub fn new(service_id: impl Into<String>, tailor_id: impl Into<String>, config: &Config) -> Self {
        let drafts = DraftService::from_config(config);
        let draft = drafts.new_draft(config.base_price);
        Self {
            service_id: service_id.into(),
            tailor_id: tailor_id.into(),
            draft,
            drafts,
            phase: WizardPhase::Step(WizardStep::Details),
        }
    }

    /// Starts a wizard from the `BookingFlow` route parameters.
    pub fn from_route(route: &Route, config: &Config) -> Result<Self> {
        match route {
            Route::BookingFlow {
                service_id,
                tailor_id,
            } => Ok(Self::new(service_id.clone(), tailor_id.clone(), config)),
            other => Err(BookingError::InvalidInput(format!(
                "booking wizard cannot start from {}",
                other.name()
            ))),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn tailor_id(&self) -> &str {
        &self.tailor_id
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    /// The step being shown, or `None` while capturing measurements or once finished.
    pub fn current_step(&self) -> Option<WizardStep> {
        match self.phase {
            WizardPhase::Step(step) => Some(step),
            _ => None,
        }
    }

    pub fn step_index(&self) -> Option<usize> {
        self.current_step().map(|step| step.index())
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.phase,
            WizardPhase::Submitted { .. } | WizardPhase::Exited
        )
    }

    pub fn update(&mut self, update: DraftUpdate) -> Result<()> {
        self.ensure_active()?;
        self.drafts.apply(&mut self.draft, update)
    }

    pub fn update_field(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_active()?;
        self.drafts.update_field(&mut self.draft, key, value)
    }

    pub fn review(&self) -> BookingSummary {
        BookingSummary::from_draft(&self.draft, &self.service_id, &self.tailor_id)
    }

    pub fn next(&mut self, gateway: &dyn OrderGateway) -> Result<Transition> {
        let step = match &self.phase {
            WizardPhase::Step(step) => *step,
            WizardPhase::CapturingMeasurements(_) => return self.complete_measurements(),
            WizardPhase::Submitted { .. } | WizardPhase::Exited => {
                return Err(BookingError::WizardFinished)
            }
        };

        match step {
            WizardStep::Measurements if !self.draft.has_measurements => {
                let form = MeasurementForm::from_values(
                    MeasurementCategory::default(),
                    &self.draft.measurements,
                );
                let route = Route::MeasurementsInput {
                    category: form.category,
                };
                tracing::debug!(category = %form.category, "opening measurements sub-flow");
                self.phase = WizardPhase::CapturingMeasurements(form);
                Ok(Transition::OpenMeasurements(route))
            }
            WizardStep::Review => self.submit(gateway),
            _ => {
                // Only Review has no successor and it is handled above.
                let next = step.next().ok_or(BookingError::WizardFinished)?;
                tracing::debug!(from = %step, to = %next, "wizard advanced");
                self.phase = WizardPhase::Step(next);
                Ok(Transition::Advanced(next))
            }
        }
    }

    pub fn back(&mut self) -> Result<Transition> {
        let step = match &self.phase {
            WizardPhase::Step(step) => *step,
            WizardPhase::CapturingMeasurements(_) => {
                tracing::debug!("measurements sub-flow dismissed");
                self.phase = WizardPhase::Step(WizardStep::Measurements);
                return Ok(Transition::Retreated(WizardStep::Measurements));
            }
            WizardPhase::Submitted { .. } | WizardPhase::Exited => {
                return Err(BookingError::WizardFinished)
            }
        };

        match step.previous() {
            Some(previous) => {
                tracing::debug!(from = %step, to = %previous, "wizard retreated");
                self.phase = WizardPhase::Step(previous);
                Ok(Transition::Retreated(previous))
            }
            None => {
                tracing::debug!("wizard exited from first step");
                self.phase = WizardPhase::Exited;
                Ok(Transition::Exit)
            }
        }
    }

    /// Submits the draft from the review step. Nothing in the draft is required.
    pub fn submit(&mut self, gateway: &dyn OrderGateway) -> Result<Transition> {
        match self.phase {
            WizardPhase::Step(WizardStep::Review) => {}
            WizardPhase::Submitted { .. } | WizardPhase::Exited => {
                return Err(BookingError::WizardFinished)
            }
            _ => {
                return Err(BookingError::InvalidTransition(
                    "bookings can only be submitted from the review step".into(),
                ))
            }
        }

        let summary = self.review();
        let order_id = gateway.submit(&summary)?;
        tracing::info!(
            order_id = %order_id,
            total = summary.prices.total,
            "booking submitted"
        );
        self.phase = WizardPhase::Submitted {
            order_id: order_id.clone(),
        };
        Ok(Transition::Submitted(Route::OrderDetail { order_id }))
    }

    pub fn measurement_form(&self) -> Option<&MeasurementForm> {
        match &self.phase {
            WizardPhase::CapturingMeasurements(form) => Some(form),
            _ => None,
        }
    }

    pub fn measurement_form_mut(&mut self) -> Result<&mut MeasurementForm> {
        match &mut self.phase {
            WizardPhase::CapturingMeasurements(form) => Ok(form),
            _ => Err(BookingError::NotInSubFlow),
        }
    }

    pub fn set_measurement(&mut self, key: &str, value: &str) -> Result<()> {
        let form = self.measurement_form_mut()?;
        form.set(key.trim().to_ascii_lowercase(), value);
        Ok(())
    }

    pub fn switch_measurement_category(&mut self, category: MeasurementCategory) -> Result<()> {
        self.measurement_form_mut()?.switch_category(category);
        Ok(())
    }

    /// Copies the captured values into the draft and moves on to review.
    pub fn complete_measurements(&mut self) -> Result<Transition> {
        let form = match std::mem::replace(&mut self.phase, WizardPhase::Step(WizardStep::Review)) {
            WizardPhase::CapturingMeasurements(form) => form,
            previous => {
                self.phase = previous;
                return Err(BookingError::NotInSubFlow);
            }
        };
        tracing::debug!(
            category = %form.category,
            fields = form.values.len(),
            "measurements captured"
        );
        self.draft.set_measurements(form.into_values());
        Ok(Transition::Advanced(WizardStep::Review))
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_finished() {
            Err(BookingError::WizardFinished)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::{PlaceholderGateway, PLACEHOLDER_ORDER_ID};

    fn wizard() -> BookingWizard {
        BookingWizard::new("svc-1", "tailor-1", &Config::default())
    }

    fn walk_to(wizard: &mut BookingWizard, step: WizardStep) {
        while wizard.current_step() != Some(step) {
            wizard.next(&PlaceholderGateway).expect("advance");
        }
    }

    #[test]
    fn starts_on_details() {
        let wizard = wizard();
        assert_eq!(wizard.current_step(), Some(WizardStep::Details));
        assert_eq!(wizard.step_index(), Some(0));
        assert_eq!(wizard.draft().base_price, Config::default().base_price);
    }

    #[test]
    fn back_after_next_returns_to_same_step() {
        for index in 0..3 {
            let mut wizard = wizard();
            let start = WizardStep::from_index(index).unwrap();
            walk_to(&mut wizard, start);
            wizard.next(&PlaceholderGateway).unwrap();
            wizard.back().unwrap();
            assert_eq!(wizard.current_step(), Some(start), "index {index}");
        }
    }

    #[test]
    fn back_on_first_step_exits() {
        let mut wizard = wizard();
        assert_eq!(wizard.back().unwrap(), Transition::Exit);
        assert_eq!(wizard.phase(), &WizardPhase::Exited);
        assert!(matches!(wizard.next(&PlaceholderGateway), Err(BookingError::WizardFinished)));
    }

    #[test]
    fn measurements_step_opens_sub_flow_without_advancing() {
        let mut wizard = wizard();
        walk_to(&mut wizard, WizardStep::Measurements);
        let transition = wizard.next(&PlaceholderGateway).unwrap();
        assert_eq!(
            transition,
            Transition::OpenMeasurements(Route::MeasurementsInput {
                category: MeasurementCategory::Top
            })
        );
        assert!(wizard.current_step().is_none());
        assert!(wizard.measurement_form().is_some());

        assert_eq!(
            wizard.back().unwrap(),
            Transition::Retreated(WizardStep::Measurements)
        );
        assert_eq!(wizard.current_step(), Some(WizardStep::Measurements));
    }

    #[test]
    fn completing_measurements_moves_to_review() {
        let mut wizard = wizard();
        walk_to(&mut wizard, WizardStep::Measurements);
        wizard.next(&PlaceholderGateway).unwrap();
        wizard.set_measurement("Chest", "98").unwrap();
        wizard.set_measurement("waist", "eighty").unwrap();

        let transition = wizard.complete_measurements().unwrap();
        assert_eq!(transition, Transition::Advanced(WizardStep::Review));
        assert!(wizard.draft().has_measurements);
        assert_eq!(wizard.draft().measurements.get("chest").map(String::as_str), Some("98"));
        assert_eq!(
            wizard.draft().measurements.get("waist").map(String::as_str),
            Some("eighty")
        );
    }

    #[test]
    fn measurements_step_advances_when_already_measured() {
        let mut wizard = wizard();
        wizard
            .update(DraftUpdate::HasMeasurements(true))
            .unwrap();
        walk_to(&mut wizard, WizardStep::Measurements);
        assert_eq!(
            wizard.next(&PlaceholderGateway).unwrap(),
            Transition::Advanced(WizardStep::Review)
        );
        wizard.back().unwrap();
        assert_eq!(wizard.current_step(), Some(WizardStep::Measurements));
    }

    #[test]
    fn measurement_helpers_require_sub_flow() {
        let mut wizard = wizard();
        assert!(matches!(
            wizard.set_measurement("chest", "1"),
            Err(BookingError::NotInSubFlow)
        ));
        assert!(matches!(
            wizard.complete_measurements(),
            Err(BookingError::NotInSubFlow)
        ));
        assert_eq!(wizard.current_step(), Some(WizardStep::Details));
    }

    #[test]
    fn empty_draft_submits_to_order_detail() {
        let mut wizard = wizard();
        wizard.update(DraftUpdate::HasMeasurements(true)).unwrap();
        walk_to(&mut wizard, WizardStep::Review);
        let transition = wizard.next(&PlaceholderGateway).unwrap();
        assert_eq!(
            transition,
            Transition::Submitted(Route::OrderDetail {
                order_id: PLACEHOLDER_ORDER_ID.into()
            })
        );
        assert!(wizard.is_finished());
        assert!(matches!(
            wizard.update_field("color", "red"),
            Err(BookingError::WizardFinished)
        ));
    }

    #[test]
    fn submit_outside_review_is_rejected() {
        let mut wizard = wizard();
        let err = wizard.submit(&PlaceholderGateway).expect_err("not on review");
        assert!(matches!(err, BookingError::InvalidTransition(_)));
    }

    #[test]
    fn from_route_requires_booking_flow() {
        let config = Config::default();
        let route = Route::BookingFlow {
            service_id: "svc".into(),
            tailor_id: "t".into(),
        };
        let wizard = BookingWizard::from_route(&route, &config).unwrap();
        assert_eq!(wizard.tailor_id(), "t");
        assert!(BookingWizard::from_route(&Route::BookingReview, &config).is_err());
    }
}
