//! The lead gate in front of the comparison table.
//!
//! The table starts locked. Submitting a valid registration form
//! unlocks it for the current session; the registration row is the
//! lead capture. Validation failures never reach the repository, and
//! a repository failure leaves the gate locked so the visitor can
//! resubmit.

use edupath_core::models::registration::{ComparisonRegistration, CreateComparisonRegistration};
use edupath_core::repository::RegistrationRepository;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{CompareError, FieldError};
use crate::resolver::ResolvedComparison;
use crate::table::ComparisonTable;

/// Raw form input for the registration gate. Validated, then
/// normalized into [`CreateComparisonRegistration`].
#[derive(Debug, Clone, Validate, serde::Deserialize)]
pub struct RegistrationInput {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(length(min = 2, max = 100, message = "city must be 2-100 characters"))]
    pub city: Option<String>,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 10 {
        return Err(ValidationError::new("phone")
            .with_message("phone must contain at least 10 digits".into()));
    }
    if phone.len() > 15 {
        return Err(
            ValidationError::new("phone").with_message("phone must be at most 15 characters".into())
        );
    }
    Ok(())
}

impl RegistrationInput {
    /// Trim whitespace and drop an empty city before validating.
    fn normalized(&self) -> Self {
        let city = self
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            city,
        }
    }

    fn check(&self) -> Result<Self, CompareError> {
        let normalized = self.normalized();
        match normalized.validate() {
            Ok(()) => Ok(normalized),
            Err(errors) => Err(CompareError::Validation(flatten_errors(&errors))),
        }
    }
}

fn flatten_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {field}")),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Whether the comparison table is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Locked,
    Unlocked,
}

/// Session-scoped gate over one resolved comparison.
#[derive(Debug, Default)]
pub struct LeadGate {
    state: GateState,
}

impl LeadGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Validate the form, record the registration, and unlock.
    ///
    /// On validation failure the repository is never called and the
    /// gate stays locked. On repository failure the gate also stays
    /// locked; the visitor retries by resubmitting.
    pub async fn submit<R: RegistrationRepository>(
        &mut self,
        repo: &R,
        input: &RegistrationInput,
        compared_courses: Vec<Uuid>,
    ) -> Result<ComparisonRegistration, CompareError> {
        let input = input.check()?;

        let created = repo
            .create(CreateComparisonRegistration {
                name: input.name,
                email: input.email,
                phone: input.phone,
                city: input.city,
                compared_courses,
            })
            .await?;

        self.state = GateState::Unlocked;
        Ok(created)
    }

    /// Project the comparison table, or `None` while locked.
    pub fn table_for(&self, comparison: &ResolvedComparison) -> Option<ComparisonTable> {
        match self.state {
            GateState::Locked => None,
            GateState::Unlocked => Some(ComparisonTable::project(comparison)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edupath_core::error::{EdupathError, EdupathResult};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Counts create calls; optionally fails every call.
    #[derive(Default)]
    struct MockRegistrations {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl RegistrationRepository for MockRegistrations {
        async fn create(
            &self,
            input: CreateComparisonRegistration,
        ) -> EdupathResult<ComparisonRegistration> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(EdupathError::Database("connection reset".into()));
            }
            Ok(ComparisonRegistration {
                id: Uuid::new_v4(),
                name: input.name,
                email: input.email,
                phone: input.phone,
                city: input.city,
                compared_courses: input.compared_courses,
                created_at: chrono::Utc::now(),
            })
        }
    }

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            name: "Priya Sharma".into(),
            email: "priya@example.com".into(),
            phone: "+91 9876543210".into(),
            city: Some("Pune".into()),
        }
    }

    #[tokio::test]
    async fn valid_submission_unlocks_and_records_once() {
        let repo = MockRegistrations::default();
        let mut gate = LeadGate::new();
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];

        let created = gate.submit(&repo, &valid_input(), ids.clone()).await.unwrap();

        assert!(gate.is_unlocked());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
        assert_eq!(created.compared_courses, ids);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_repository() {
        let repo = MockRegistrations::default();
        let mut gate = LeadGate::new();
        let input = RegistrationInput {
            name: "P".into(),
            email: "not-an-email".into(),
            phone: "12345".into(),
            city: None,
        };

        let err = gate.submit(&repo, &input, vec![]).await.unwrap_err();

        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
        assert!(!gate.is_unlocked());
        let fields: Vec<&str> = match &err {
            CompareError::Validation(errs) => errs.iter().map(|e| e.field.as_str()).collect(),
            other => panic!("expected validation error, got {other:?}"),
        };
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"phone"));
    }

    #[tokio::test]
    async fn repository_failure_keeps_gate_locked_and_retryable() {
        let repo = MockRegistrations::default();
        repo.fail.store(true, Ordering::SeqCst);
        let mut gate = LeadGate::new();

        let err = gate.submit(&repo, &valid_input(), vec![]).await.unwrap_err();
        assert!(matches!(err, CompareError::Repository(_)));
        assert!(!gate.is_unlocked());

        // Resubmission after the backend recovers succeeds.
        repo.fail.store(false, Ordering::SeqCst);
        gate.submit(&repo, &valid_input(), vec![]).await.unwrap();
        assert!(gate.is_unlocked());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_city_is_dropped_not_rejected() {
        let repo = MockRegistrations::default();
        let mut gate = LeadGate::new();
        let mut input = valid_input();
        input.city = Some("   ".into());

        let created = gate.submit(&repo, &input, vec![]).await.unwrap();
        assert_eq!(created.city, None);
    }

    #[test]
    fn phone_digit_count_ignores_separators() {
        let mut input = valid_input();
        input.phone = "+91-98765-43210".into();
        assert!(input.check().is_ok());

        input.phone = "+91-98-76".into();
        assert!(input.check().is_err());
    }

    #[tokio::test]
    async fn nine_digit_phone_is_rejected_ten_passes() {
        let repo = MockRegistrations::default();
        let mut gate = LeadGate::new();

        let mut input = valid_input();
        input.phone = "987654321".into();
        assert!(gate.submit(&repo, &input, vec![]).await.is_err());
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);

        input.phone = "9876543210".into();
        gate.submit(&repo, &input, vec![]).await.unwrap();
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }
}
