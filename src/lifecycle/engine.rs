use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::models::{
    AuditAction, AuditLogEntry, LifecycleEvent, NewTrainingRequest, Notification, PoDocument,
    PoStatus, Trainer, TrainerInvoice, TrainerInvoiceStatus, Training, TrainingStatus, User,
};
use crate::store::repositories::{
    AuditLogRepository, ClientRepository, NotificationRepository, TrainerRepository,
    TrainingRepository,
};
use crate::store::JsonStore;

use super::invoice::compute_client_invoice;

/// Validates and applies training lifecycle transitions, computes dependent
/// fields and emits the side effects each transition requires.
///
/// Every operation is all-or-nothing with respect to the training record:
/// the transition is checked against the table before anything is written.
/// Audit and notification writes happen after the primary mutation and are
/// fire-and-forget; their failure is logged, never rolled back.
pub struct LifecycleEngine<'a> {
    store: &'a JsonStore,
}

impl<'a> LifecycleEngine<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Raises a new training request on behalf of the acting client.
    pub async fn create_request(
        &self,
        actor: &User,
        request: NewTrainingRequest,
    ) -> AppResult<Training> {
        request.validate()?;

        let training = Training {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            technology: request.technology,
            client_id: actor.client_scope().to_string(),
            trainer_id: None,
            budget: request.budget,
            preferred_dates: request.preferred_dates,
            status: TrainingStatus::Requested,
            client_po: Some(PoDocument {
                filename: "PO_Pending.pdf".to_string(),
                status: PoStatus::Uploaded,
            }),
            trainer_po: None,
            client_invoice: None,
            trainer_invoice: None,
        };

        TrainingRepository::create(self.store, &training).await?;
        self.record_audit(
            actor,
            AuditAction::RaiseRequest,
            format!("Client raised request for {}", training.title),
        )
        .await;

        Ok(training)
    }

    /// Assigns a trainer to a requested training and notifies the client.
    pub async fn assign_trainer(
        &self,
        actor: &User,
        training_id: &str,
        trainer_id: &str,
    ) -> AppResult<Training> {
        let mut training = self.load(training_id).await?;
        let next = self.advance(&training, LifecycleEvent::AssignTrainer)?;

        let trainer = TrainerRepository::find(self.store, trainer_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("trainer {trainer_id}")))?;

        training.trainer_id = Some(trainer_id.to_string());
        training.trainer_po = Some(PoDocument {
            filename: format!("TPO_{}_{}.pdf", trainer_id, training.id),
            status: PoStatus::Generated,
        });
        training.status = next;

        TrainingRepository::replace(self.store, &training).await?;
        self.record_audit(
            actor,
            AuditAction::AssignTrainer,
            format!("Assigned {} to {}", trainer.name, training.title),
        )
        .await;
        self.notify(
            &training.client_id,
            format!(
                "Trainer has been assigned to your request: {}",
                training.title
            ),
        )
        .await;

        Ok(training)
    }

    /// The assigned trainer accepts the generated PO and starts delivery.
    pub async fn accept_assignment(&self, actor: &User, training_id: &str) -> AppResult<Training> {
        let mut training = self.load(training_id).await?;
        let next = self.advance(&training, LifecycleEvent::AcceptAssignment)?;

        if let Some(po) = training.trainer_po.as_mut() {
            po.status = PoStatus::Accepted;
        }
        training.status = next;

        TrainingRepository::replace(self.store, &training).await?;
        self.record_audit(
            actor,
            AuditAction::AcceptPo,
            format!("{} accepted PO for {}", actor.name, training.title),
        )
        .await;

        Ok(training)
    }

    /// Marks an active training as delivered.
    pub async fn mark_completed(&self, actor: &User, training_id: &str) -> AppResult<Training> {
        let mut training = self.load(training_id).await?;
        let next = self.advance(&training, LifecycleEvent::MarkCompleted)?;
        training.status = next;

        TrainingRepository::replace(self.store, &training).await?;
        self.record_audit(
            actor,
            AuditAction::MarkCompleted,
            format!("{} completed {}", actor.name, training.title),
        )
        .await;

        Ok(training)
    }

    /// Attaches the trainer's invoice to a completed training. Status is
    /// unchanged and no audit entry is recorded for this step.
    pub async fn upload_trainer_invoice(
        &self,
        actor: &User,
        training_id: &str,
    ) -> AppResult<Training> {
        let mut training = self.load(training_id).await?;
        if training.trainer_invoice.is_some() {
            return Err(AppError::Conflict(
                "trainer invoice already uploaded".to_string(),
            ));
        }
        if training.status != TrainingStatus::Completed {
            return Err(AppError::IllegalTransition {
                status: training.status,
                event: LifecycleEvent::UploadTrainerInvoice,
            });
        }

        training.trainer_invoice = Some(TrainerInvoice {
            filename: format!("INV_{}_{}.pdf", actor.id, training.id),
            status: TrainerInvoiceStatus::PendingApproval,
        });

        TrainingRepository::replace(self.store, &training).await?;
        Ok(training)
    }

    /// Computes and attaches the client invoice, moving the training to
    /// `Invoice Generated`.
    pub async fn generate_client_invoice(
        &self,
        actor: &User,
        training_id: &str,
    ) -> AppResult<Training> {
        let mut training = self.load(training_id).await?;
        if training.client_invoice.is_some() {
            return Err(AppError::Conflict(
                "client invoice already generated".to_string(),
            ));
        }
        let next = self.advance(&training, LifecycleEvent::GenerateClientInvoice)?;

        let company_name = ClientRepository::find(self.store, &training.client_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| "Unknown Client".to_string());

        let invoice = compute_client_invoice(&training, company_name, OffsetDateTime::now_utc());
        let invoice_number = invoice.invoice_number.clone();
        training.client_invoice = Some(invoice);
        training.status = next;

        TrainingRepository::replace(self.store, &training).await?;
        self.record_audit(
            actor,
            AuditAction::GenerateInvoice,
            format!(
                "Generated client invoice {} for {}",
                invoice_number, training.title
            ),
        )
        .await;

        Ok(training)
    }

    /// Permanently removes a training request. The caller must have passed an
    /// explicit confirmation gate. Deletions are not audited.
    pub async fn delete_request(
        &self,
        _actor: &User,
        training_id: &str,
        confirmed: bool,
    ) -> AppResult<()> {
        if !confirmed {
            return Err(AppError::BadRequest(
                "deletion requires explicit confirmation".to_string(),
            ));
        }
        match TrainingRepository::delete(self.store, training_id).await {
            Ok(()) => Ok(()),
            Err(crate::store::StoreError::NotFound) => {
                Err(AppError::NotFound(format!("training {training_id}")))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Shortlist of trainers whose declared stack fits the training's
    /// technology. Advisory only; assignment is not restricted to it.
    pub async fn eligible_trainers(&self, training_id: &str) -> AppResult<Vec<Trainer>> {
        let training = self.load(training_id).await?;
        let trainers = TrainerRepository::list(self.store).await?;
        Ok(trainers
            .into_iter()
            .filter(|t| t.matches_technology(&training.technology))
            .collect())
    }

    async fn load(&self, training_id: &str) -> AppResult<Training> {
        TrainingRepository::find(self.store, training_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("training {training_id}")))
    }

    fn advance(&self, training: &Training, event: LifecycleEvent) -> AppResult<TrainingStatus> {
        training
            .status
            .apply(event)
            .ok_or(AppError::IllegalTransition {
                status: training.status,
                event,
            })
    }

    async fn record_audit(&self, actor: &User, action: AuditAction, details: String) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: OffsetDateTime::now_utc(),
            user_id: actor.id.clone(),
            action,
            details,
        };
        if let Err(err) = AuditLogRepository::append(self.store, &entry).await {
            warn!(action = ?entry.action, error = %err, "audit log write failed");
        }
    }

    async fn notify(&self, user_id: &str, message: String) {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            message,
            read: false,
            timestamp: OffsetDateTime::now_utc(),
        };
        if let Err(err) = NotificationRepository::create(self.store, &notification).await {
            warn!(user_id = %notification.user_id, error = %err, "notification write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::collections;
    use crate::store::models::{Client, Role};
    use serde_json::json;
    use time::macros::date;

    fn client_user() -> User {
        User {
            id: "U-priya".into(),
            name: "Priya".into(),
            email: "client@techcorp.com".into(),
            role: Role::Client,
            company_id: Some("C1".into()),
        }
    }

    fn admin_user() -> User {
        User {
            id: "U-admin".into(),
            name: "Admin".into(),
            email: "admin@edutech.com".into(),
            role: Role::Admin,
            company_id: None,
        }
    }

    fn trainer_user() -> User {
        User {
            id: "T1".into(),
            name: "Asha Verma".into(),
            email: "trainer@edutech.com".into(),
            role: Role::Trainer,
            company_id: None,
        }
    }

    async fn seeded_store() -> JsonStore {
        let store = JsonStore::in_memory();
        store
            .create(
                collections::CLIENTS,
                serde_json::to_value(Client {
                    id: "C1".into(),
                    name: "TechCorp".into(),
                })
                .unwrap(),
            )
            .await
            .unwrap();
        store
            .create(
                collections::TRAINERS,
                json!({
                    "id": "T1",
                    "name": "Asha Verma",
                    "techStack": ["Angular", "React"],
                    "rating": 4.8,
                    "experience": 6
                }),
            )
            .await
            .unwrap();
        store
            .create(
                collections::TRAINERS,
                json!({
                    "id": "T2",
                    "name": "Rohit Iyer",
                    "techStack": ["Java", "Spring"],
                    "rating": 4.5,
                    "experience": 9
                }),
            )
            .await
            .unwrap();
        store
    }

    fn angular_request() -> NewTrainingRequest {
        NewTrainingRequest {
            title: "Angular Mastery".into(),
            technology: "Angular".into(),
            preferred_dates: date!(2026 - 09 - 15),
            budget: 50000.0,
        }
    }

    async fn raise(store: &JsonStore) -> Training {
        LifecycleEngine::new(store)
            .create_request(&client_user(), angular_request())
            .await
            .unwrap()
    }

    async fn audit_entries(store: &JsonStore) -> Vec<AuditLogEntry> {
        AuditLogRepository::list(store).await.unwrap()
    }

    fn assert_requested_invariant(training: &Training) {
        assert_eq!(
            training.status == TrainingStatus::Requested,
            training.trainer_id.is_none(),
            "trainerId must be null exactly while the training is Requested"
        );
    }

    #[tokio::test]
    async fn create_request_starts_in_requested() {
        let store = seeded_store().await;
        let training = raise(&store).await;

        assert_eq!(training.status, TrainingStatus::Requested);
        assert_eq!(training.trainer_id, None);
        assert_eq!(training.client_id, "C1");
        let po = training.client_po.as_ref().unwrap();
        assert_eq!(po.filename, "PO_Pending.pdf");
        assert_eq!(po.status, PoStatus::Uploaded);
        assert!(training.trainer_po.is_none());
        assert!(training.client_invoice.is_none());
        assert!(training.trainer_invoice.is_none());

        let entries = audit_entries(&store).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::RaiseRequest);
        assert_eq!(entries[0].user_id, "U-priya");
        assert_eq!(entries[0].details, "Client raised request for Angular Mastery");
    }

    #[tokio::test]
    async fn create_request_rejects_invalid_fields() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);

        let mut blank_title = angular_request();
        blank_title.title.clear();
        assert!(matches!(
            engine.create_request(&client_user(), blank_title).await,
            Err(AppError::Validation(_))
        ));

        let mut zero_budget = angular_request();
        zero_budget.budget = 0.0;
        assert!(matches!(
            engine.create_request(&client_user(), zero_budget).await,
            Err(AppError::Validation(_))
        ));

        let mut negative_budget = angular_request();
        negative_budget.budget = -1.0;
        assert!(matches!(
            engine.create_request(&client_user(), negative_budget).await,
            Err(AppError::Validation(_))
        ));

        // Nothing persisted, no side effects.
        assert!(TrainingRepository::list(&store).await.unwrap().is_empty());
        assert!(audit_entries(&store).await.is_empty());
    }

    #[tokio::test]
    async fn assign_trainer_generates_po_and_notifies_client() {
        let store = seeded_store().await;
        let training = raise(&store).await;

        let updated = LifecycleEngine::new(&store)
            .assign_trainer(&admin_user(), &training.id, "T1")
            .await
            .unwrap();

        assert_eq!(updated.status, TrainingStatus::TrainerAssigned);
        assert_eq!(updated.trainer_id.as_deref(), Some("T1"));
        let po = updated.trainer_po.as_ref().unwrap();
        assert_eq!(po.filename, format!("TPO_T1_{}.pdf", training.id));
        assert_eq!(po.status, PoStatus::Generated);

        let entries = audit_entries(&store).await;
        assert_eq!(entries.len(), 2);
        let assignment = entries
            .iter()
            .find(|e| e.action == AuditAction::AssignTrainer)
            .unwrap();
        assert_eq!(assignment.details, "Assigned Asha Verma to Angular Mastery");

        let notifications = NotificationRepository::list_for_user(&store, "C1")
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(!notifications[0].read);
        assert_eq!(
            notifications[0].message,
            "Trainer has been assigned to your request: Angular Mastery"
        );
    }

    #[tokio::test]
    async fn assign_trainer_requires_requested_status() {
        let store = seeded_store().await;
        let training = raise(&store).await;
        let engine = LifecycleEngine::new(&store);

        engine
            .assign_trainer(&admin_user(), &training.id, "T1")
            .await
            .unwrap();
        let before = TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .unwrap();

        let err = engine
            .assign_trainer(&admin_user(), &training.id, "T2")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::IllegalTransition {
                status: TrainingStatus::TrainerAssigned,
                event: LifecycleEvent::AssignTrainer,
            }
        ));

        // No mutation, no extra side effects.
        let after = TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after, before);
        assert_eq!(audit_entries(&store).await.len(), 2);
        assert_eq!(
            NotificationRepository::list_for_user(&store, "C1")
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn assign_trainer_rejects_unknown_trainer() {
        let store = seeded_store().await;
        let training = raise(&store).await;

        let err = LifecycleEngine::new(&store)
            .assign_trainer(&admin_user(), &training.id, "T-ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // The training stays Requested with no dangling trainerId, and the
        // failed attempt leaves no audit entry or notification behind.
        let unchanged = TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged, training);
        assert_eq!(audit_entries(&store).await.len(), 1);
        assert!(NotificationRepository::list_for_user(&store, "C1")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn accept_assignment_rejected_while_requested() {
        let store = seeded_store().await;
        let training = raise(&store).await;

        let err = LifecycleEngine::new(&store)
            .accept_assignment(&trainer_user(), &training.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::IllegalTransition {
                status: TrainingStatus::Requested,
                event: LifecycleEvent::AcceptAssignment,
            }
        ));

        let unchanged = TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged, training);
        assert_eq!(audit_entries(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn full_lifecycle_scenario() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);

        let training = raise(&store).await;
        assert_eq!(training.status, TrainingStatus::Requested);
        assert!(training.trainer_id.is_none());
        assert_requested_invariant(&training);

        let training = engine
            .assign_trainer(&admin_user(), &training.id, "T1")
            .await
            .unwrap();
        assert_eq!(training.status, TrainingStatus::TrainerAssigned);
        assert_eq!(training.trainer_po.as_ref().unwrap().status, PoStatus::Generated);
        assert_requested_invariant(&training);

        let training = engine
            .accept_assignment(&trainer_user(), &training.id)
            .await
            .unwrap();
        assert_eq!(training.status, TrainingStatus::Active);
        assert_eq!(training.trainer_po.as_ref().unwrap().status, PoStatus::Accepted);
        assert_requested_invariant(&training);

        let training = engine
            .mark_completed(&trainer_user(), &training.id)
            .await
            .unwrap();
        assert_eq!(training.status, TrainingStatus::Completed);

        let training = engine
            .generate_client_invoice(&admin_user(), &training.id)
            .await
            .unwrap();
        assert_eq!(training.status, TrainingStatus::InvoiceGenerated);
        let invoice = training.client_invoice.as_ref().unwrap();
        assert_eq!(invoice.total_amount, 59000.0);
        assert_eq!(invoice.gst, 9000.0);
        assert_eq!(invoice.company_name, "TechCorp");
        assert!(invoice.invoice_number.starts_with("INV-CL-"));
        assert!(invoice.invoice_number["INV-CL-".len()..]
            .parse::<u32>()
            .is_ok_and(|n| (1000..=9999).contains(&n)));
        assert_requested_invariant(&training);

        let actions: Vec<AuditAction> = audit_entries(&store)
            .await
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert!(actions.contains(&AuditAction::RaiseRequest));
        assert!(actions.contains(&AuditAction::AssignTrainer));
        assert!(actions.contains(&AuditAction::AcceptPo));
        assert!(actions.contains(&AuditAction::MarkCompleted));
        assert!(actions.contains(&AuditAction::GenerateInvoice));
        assert_eq!(actions.len(), 5);
    }

    #[tokio::test]
    async fn generate_client_invoice_is_guarded_against_repeats() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);
        let training = raise(&store).await;
        engine
            .assign_trainer(&admin_user(), &training.id, "T1")
            .await
            .unwrap();
        engine
            .accept_assignment(&trainer_user(), &training.id)
            .await
            .unwrap();
        engine
            .mark_completed(&trainer_user(), &training.id)
            .await
            .unwrap();

        let first = engine
            .generate_client_invoice(&admin_user(), &training.id)
            .await
            .unwrap();
        let first_number = first.client_invoice.as_ref().unwrap().invoice_number.clone();

        let err = engine
            .generate_client_invoice(&admin_user(), &training.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let unchanged = TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            unchanged.client_invoice.as_ref().unwrap().invoice_number,
            first_number
        );
    }

    #[tokio::test]
    async fn upload_trainer_invoice_only_after_completion() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);
        let training = raise(&store).await;
        engine
            .assign_trainer(&admin_user(), &training.id, "T1")
            .await
            .unwrap();
        engine
            .accept_assignment(&trainer_user(), &training.id)
            .await
            .unwrap();

        // Still active: rejected.
        let err = engine
            .upload_trainer_invoice(&trainer_user(), &training.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IllegalTransition { .. }));

        engine
            .mark_completed(&trainer_user(), &training.id)
            .await
            .unwrap();

        let updated = engine
            .upload_trainer_invoice(&trainer_user(), &training.id)
            .await
            .unwrap();
        assert_eq!(updated.status, TrainingStatus::Completed);
        let invoice = updated.trainer_invoice.as_ref().unwrap();
        assert_eq!(invoice.filename, format!("INV_T1_{}.pdf", training.id));
        assert_eq!(invoice.status, TrainerInvoiceStatus::PendingApproval);

        let err = engine
            .upload_trainer_invoice(&trainer_user(), &training.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_request_needs_confirmation() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);
        let training = raise(&store).await;

        let err = engine
            .delete_request(&admin_user(), &training.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .is_some());

        engine
            .delete_request(&admin_user(), &training.id, true)
            .await
            .unwrap();
        assert!(TrainingRepository::find(&store, &training.id)
            .await
            .unwrap()
            .is_none());

        // Deletion leaves no audit trace.
        assert_eq!(audit_entries(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn eligible_trainers_shortlists_by_technology() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);
        let training = raise(&store).await;

        let shortlist = engine.eligible_trainers(&training.id).await.unwrap();
        let ids: Vec<&str> = shortlist.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1"]);

        // The shortlist is advisory: assigning outside it still works.
        let updated = engine
            .assign_trainer(&admin_user(), &training.id, "T2")
            .await
            .unwrap();
        assert_eq!(updated.trainer_id.as_deref(), Some("T2"));
    }

    #[tokio::test]
    async fn operations_on_unknown_trainings_are_not_found() {
        let store = seeded_store().await;
        let engine = LifecycleEngine::new(&store);

        let err = engine
            .assign_trainer(&admin_user(), "ghost", "T1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = engine
            .delete_request(&admin_user(), "ghost", true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
