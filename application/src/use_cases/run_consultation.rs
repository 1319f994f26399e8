//! Run Consultation use case
//!
//! Drives one consultation through its fixed sequence of stages:
//!
//! 1. GeneratePatientSymptom: free text, appended to [`CaseMemory`]
//! 2. Recall: keyword lookup in [`CaseMemory`]
//! 3. Diagnose: doctor, with the recall as assistant context
//! 4. Prescribe: pharmacist, JSON mode
//! 5. Validate: [`FactValidator`] on diagnosis + medication
//! 6. FinalReview: validator summary over all prior outputs
//! 7. Feedback: one-line patient verdict
//! 8. Finalize: [`CaseRecord`] handed to the [`CaseRecordSink`]
//!
//! The first failing stage aborts the run; nothing is persisted for it.

use crate::config::ConsultationParams;
use crate::ports::case_record_sink::{CaseRecordSink, PersistenceError};
use crate::ports::completion_client::{CompletionClient, CompletionRequest, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::fact_validator::{FactValidationError, FactValidator};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use consult_domain::{
    AgentRole, CaseMemory, CaseRecord, DomainError, MedicationAdvice, Message, PromptTemplate,
    Stage,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a consultation
#[derive(Error, Debug)]
pub enum RunConsultationError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Fact validation error: {0}")]
    FactValidation(#[from] FactValidationError),

    #[error("Pharmacist returned malformed structured output: {0}")]
    MalformedStructuredOutput(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl RunConsultationError {
    /// Whether the failure came from an external service (completion,
    /// validation, or the shape of a structured response)
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            RunConsultationError::GatewayError(_)
                | RunConsultationError::FactValidation(_)
                | RunConsultationError::MalformedStructuredOutput(_)
        )
    }
}

/// Use case for running one consultation
pub struct RunConsultationUseCase<C: CompletionClient + 'static> {
    client: Arc<C>,
    validator: Arc<dyn FactValidator>,
    sink: Arc<dyn CaseRecordSink>,
    params: ConsultationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<C: CompletionClient + 'static> RunConsultationUseCase<C> {
    pub fn new(
        client: Arc<C>,
        validator: Arc<dyn FactValidator>,
        sink: Arc<dyn CaseRecordSink>,
        params: ConsultationParams,
    ) -> Self {
        Self {
            client,
            validator,
            sink,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &ConsultationParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        memory: &mut CaseMemory,
    ) -> Result<CaseRecord, RunConsultationError> {
        self.execute_with_progress(memory, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        memory: &mut CaseMemory,
        progress: &dyn ProgressNotifier,
    ) -> Result<CaseRecord, RunConsultationError> {
        info!(
            model = %self.params.model,
            remembered_cases = memory.len(),
            "Starting consultation"
        );

        let symptoms = self
            .complete_stage(
                Stage::GeneratePatientSymptom,
                vec![
                    Message::system(PromptTemplate::symptom_generator_system()),
                    Message::user(PromptTemplate::symptom_request()),
                ],
                progress,
            )
            .await?;
        memory.append(symptoms.clone());

        progress.on_stage_start(Stage::Recall);
        let similar_case = memory.retrieve_similar(&symptoms);
        debug!(recall = %similar_case, "Memory recall");
        progress.on_stage_complete(Stage::Recall, &similar_case);

        let diagnosis = self
            .complete_stage(
                Stage::Diagnose,
                vec![
                    Message::system(AgentRole::Doctor.instruction()),
                    Message::user(symptoms.clone()),
                    Message::assistant(PromptTemplate::memory_recall(&similar_case)),
                ],
                progress,
            )
            .await?;

        let medication_info = self
            .complete_stage(
                Stage::Prescribe,
                vec![
                    Message::system(AgentRole::Pharmacist.instruction()),
                    Message::user(PromptTemplate::pharmacist_request(&diagnosis)),
                ],
                progress,
            )
            .await?;
        if self.params.validate_medication_schema {
            MedicationAdvice::parse(&medication_info).map_err(|e| {
                warn!("Pharmacist output failed schema check: {}", e);
                RunConsultationError::MalformedStructuredOutput(e.to_string())
            })?;
        }

        let validation = self
            .validate_stage(&diagnosis, &medication_info, progress)
            .await?;

        let summary = self
            .complete_stage(
                Stage::FinalReview,
                vec![
                    Message::system(AgentRole::Validator.instruction()),
                    Message::user(PromptTemplate::patient_symptoms(&symptoms)),
                    Message::assistant(PromptTemplate::doctor_response(&diagnosis)),
                    Message::assistant(PromptTemplate::pharmacist_suggestion(&medication_info)),
                    Message::assistant(PromptTemplate::knowledge_validation(&validation)),
                ],
                progress,
            )
            .await?;

        let feedback = self
            .complete_stage(
                Stage::Feedback,
                vec![
                    Message::system(AgentRole::Feedback.instruction()),
                    Message::user(PromptTemplate::feedback_request(&summary)),
                ],
                progress,
            )
            .await?;

        progress.on_stage_start(Stage::Finalize);
        let record = CaseRecord::builder()
            .symptoms(symptoms)
            .diagnosis(diagnosis)
            .medication(medication_info)
            .validation(validation)
            .summary(summary)
            .feedback(feedback)
            .build()?;

        self.sink.persist(&record)?;
        info!("Case record persisted");
        self.conversation_logger.log(ConversationEvent::new(
            "case_persisted",
            serde_json::to_value(&record).unwrap_or_default(),
        ));
        progress.on_stage_complete(Stage::Finalize, "");
        progress.on_record_persisted(&record);

        Ok(record)
    }

    /// Send one stage's conversation and return the completion text
    async fn complete_stage(
        &self,
        stage: Stage,
        messages: Vec<Message>,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, RunConsultationError> {
        progress.on_stage_start(stage);

        let request = CompletionRequest::new(messages, self.params.options_for(stage));
        debug!(
            stage = %stage,
            model = %request.options.model,
            json_mode = request.options.json_mode,
            messages = request.messages.len(),
            "Requesting completion"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "completion_request",
            serde_json::json!({
                "stage": stage.as_str(),
                "model": request.options.model.as_str(),
                "temperature": request.options.temperature,
                "json_mode": request.options.json_mode,
                "messages": request.messages,
            }),
        ));

        let text = self.client.complete(&request).await.map_err(|e| {
            warn!(stage = %stage, "Completion failed: {}", e);
            e
        })?;

        info!(stage = %stage, bytes = text.len(), "Stage complete");
        self.conversation_logger.log(ConversationEvent::new(
            "completion_response",
            serde_json::json!({
                "stage": stage.as_str(),
                "bytes": text.len(),
                "text": text,
            }),
        ));
        progress.on_stage_complete(stage, &text);

        Ok(text)
    }

    async fn validate_stage(
        &self,
        diagnosis: &str,
        medication_info: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, RunConsultationError> {
        progress.on_stage_start(Stage::Validate);

        let query = PromptTemplate::validation_query(diagnosis, medication_info);
        let validation = self.validator.validate(&query).await.map_err(|e| {
            warn!("Fact validation failed: {}", e);
            e
        })?;

        info!(stage = %Stage::Validate, bytes = validation.len(), "Stage complete");
        self.conversation_logger.log(ConversationEvent::new(
            "fact_validation",
            serde_json::json!({
                "query_bytes": query.len(),
                "text": validation,
            }),
        ));
        progress.on_stage_complete(Stage::Validate, &validation);

        Ok(validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use consult_domain::{Model, Role};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    const SYMPTOMS: &str = "Sharp stabbing headache behind the left eye since morning";
    const DIAGNOSIS: &str = "Likely cluster headache; consider neurological exam";
    const MEDICATION: &str = r#"{"medication":"Sumatriptan","dosage":"6mg SC","interactions":"Avoid MAOIs","advice":"Oxygen therapy"}"#;
    const VALIDATION: &str = "Validated: coherent";
    const SUMMARY: &str = "Diagnosis and treatment are consistent";
    const FEEDBACK: &str = "Useful, the pain eased.";

    struct ScriptedClient {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn happy() -> Self {
            Self::new(vec![
                Ok(SYMPTOMS.to_string()),
                Ok(DIAGNOSIS.to_string()),
                Ok(MEDICATION.to_string()),
                Ok(SUMMARY.to_string()),
                Ok(FEEDBACK.to_string()),
            ])
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    #[derive(Default)]
    struct RecordingValidator {
        inputs: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl FactValidator for RecordingValidator {
        async fn validate(&self, text: &str) -> Result<String, FactValidationError> {
            self.inputs.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(FactValidationError::Unavailable("offline".to_string()));
            }
            Ok(VALIDATION.to_string())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<CaseRecord>>,
    }

    impl CaseRecordSink for RecordingSink {
        fn persist(&self, record: &CaseRecord) -> Result<(), PersistenceError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl CaseRecordSink for FailingSink {
        fn persist(&self, _record: &CaseRecord) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io {
                path: "last_case_log.json".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        completed: Mutex<Vec<Stage>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, _stage: Stage) {}

        fn on_stage_complete(&self, stage: Stage, _output: &str) {
            self.completed.lock().unwrap().push(stage);
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    struct Harness {
        client: Arc<ScriptedClient>,
        validator: Arc<RecordingValidator>,
        sink: Arc<RecordingSink>,
    }

    impl Harness {
        fn new(client: ScriptedClient) -> Self {
            Self {
                client: Arc::new(client),
                validator: Arc::new(RecordingValidator::default()),
                sink: Arc::new(RecordingSink::default()),
            }
        }

        fn use_case(&self, params: ConsultationParams) -> RunConsultationUseCase<ScriptedClient> {
            RunConsultationUseCase::new(
                self.client.clone(),
                self.validator.clone(),
                self.sink.clone(),
                params,
            )
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_record_is_snapshot_of_stage_outputs() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();

        let record = harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap();

        assert_eq!(
            record,
            CaseRecord {
                symptoms: SYMPTOMS.to_string(),
                diagnosis: DIAGNOSIS.to_string(),
                medication: MEDICATION.to_string(),
                validation: VALIDATION.to_string(),
                summary: SUMMARY.to_string(),
                feedback: FEEDBACK.to_string(),
            }
        );
        assert_eq!(harness.sink.records.lock().unwrap().as_slice(), &[record]);
    }

    #[tokio::test]
    async fn test_symptom_is_appended_to_memory() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();
        memory.append("Older case of knee pain");

        harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap();

        assert_eq!(
            memory.iter().collect::<Vec<_>>(),
            vec!["Older case of knee pain", SYMPTOMS]
        );
    }

    #[tokio::test]
    async fn test_doctor_conversation_carries_recall() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();

        harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap();

        let requests = harness.client.requests();
        let doctor = &requests[1].messages;
        assert_eq!(doctor.len(), 3);
        assert_eq!(doctor[0], Message::system(AgentRole::Doctor.instruction()));
        assert_eq!(doctor[1], Message::user(SYMPTOMS));
        assert_eq!(doctor[2].role, Role::Assistant);
        // The symptom was stored before recall, so it recalls itself
        assert_eq!(
            doctor[2].content,
            format!("Memory recall: Similar past case found: {}", SYMPTOMS)
        );
    }

    #[tokio::test]
    async fn test_prescribe_embeds_diagnosis_and_is_only_json_stage() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();

        harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap();

        let requests = harness.client.requests();
        assert_eq!(requests.len(), 5);

        let json_stages: Vec<usize> = requests
            .iter()
            .enumerate()
            .filter(|(_, r)| r.options.json_mode)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(json_stages, vec![2]);

        let pharmacist = &requests[2].messages;
        assert_eq!(
            pharmacist[0],
            Message::system(AgentRole::Pharmacist.instruction())
        );
        assert!(pharmacist[1].content.contains(DIAGNOSIS));
        assert!(requests.iter().all(|r| !r.options.stream));
        assert!(requests.iter().all(|r| r.options.functions.is_empty()));
    }

    #[tokio::test]
    async fn test_validator_receives_diagnosis_and_medication() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();

        harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap();

        let inputs = harness.validator.inputs.lock().unwrap().clone();
        assert_eq!(
            inputs,
            vec![format!("Diagnosis: {}. Drug info: {}", DIAGNOSIS, MEDICATION)]
        );
    }

    #[tokio::test]
    async fn test_final_review_and_feedback_conversations() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();

        harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap();

        let requests = harness.client.requests();
        let review = &requests[3].messages;
        let roles: Vec<Role> = review.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::Assistant,
                Role::Assistant
            ]
        );
        assert_eq!(review[1].content, format!("Patient symptoms: {}", SYMPTOMS));
        assert_eq!(
            review[4].content,
            format!("Validated against knowledge base: {}", VALIDATION)
        );

        let feedback = &requests[4].messages;
        assert_eq!(feedback[0], Message::system(AgentRole::Feedback.instruction()));
        assert!(feedback[1].content.contains(SUMMARY));
    }

    #[tokio::test]
    async fn test_params_flow_into_every_request() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();
        let params = ConsultationParams::default()
            .with_model(Model::Gpt4o)
            .with_temperature(0.9);

        harness.use_case(params).execute(&mut memory).await.unwrap();

        for request in harness.client.requests() {
            assert_eq!(request.options.model, Model::Gpt4o);
            assert!((request.options.temperature - 0.9).abs() < f32::EPSILON);
        }
    }

    #[tokio::test]
    async fn test_failure_at_diagnose_stops_pipeline() {
        let client = ScriptedClient::new(vec![
            Ok(SYMPTOMS.to_string()),
            Err(GatewayError::RateLimited("slow down".to_string())),
        ]);
        let harness = Harness::new(client);
        let mut memory = CaseMemory::new();

        let err = harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await
            .unwrap_err();

        assert!(err.is_service_error());
        assert!(matches!(
            err,
            RunConsultationError::GatewayError(GatewayError::RateLimited(_))
        ));
        assert_eq!(harness.client.requests().len(), 2);
        assert!(harness.validator.inputs.lock().unwrap().is_empty());
        assert!(harness.sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_at_feedback_persists_nothing() {
        let client = ScriptedClient::new(vec![
            Ok(SYMPTOMS.to_string()),
            Ok(DIAGNOSIS.to_string()),
            Ok(MEDICATION.to_string()),
            Ok(SUMMARY.to_string()),
            Err(GatewayError::Timeout),
        ]);
        let harness = Harness::new(client);
        let mut memory = CaseMemory::new();

        let result = harness
            .use_case(ConsultationParams::default())
            .execute(&mut memory)
            .await;

        assert!(result.is_err());
        assert!(harness.sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validator_failure_aborts_before_review() {
        let client = Arc::new(ScriptedClient::happy());
        let sink = Arc::new(RecordingSink::default());
        let validator = Arc::new(RecordingValidator {
            fail: true,
            ..Default::default()
        });
        let use_case = RunConsultationUseCase::new(
            client.clone(),
            validator,
            sink.clone(),
            ConsultationParams::default(),
        );
        let mut memory = CaseMemory::new();

        let err = use_case.execute(&mut memory).await.unwrap_err();

        assert!(matches!(err, RunConsultationError::FactValidation(_)));
        assert_eq!(client.requests().len(), 3);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schema_check_rejects_malformed_medication() {
        let client = ScriptedClient::new(vec![
            Ok(SYMPTOMS.to_string()),
            Ok(DIAGNOSIS.to_string()),
            Ok(r#"{"medication":"Sumatriptan"}"#.to_string()),
        ]);
        let harness = Harness::new(client);
        let mut memory = CaseMemory::new();
        let params = ConsultationParams::default().with_medication_schema_check(true);

        let err = harness.use_case(params).execute(&mut memory).await.unwrap_err();

        assert!(matches!(
            err,
            RunConsultationError::MalformedStructuredOutput(_)
        ));
        assert!(err.is_service_error());
        assert!(harness.validator.inputs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schema_check_accepts_well_formed_medication() {
        let harness = Harness::new(ScriptedClient::happy());
        let mut memory = CaseMemory::new();
        let params = ConsultationParams::default().with_medication_schema_check(true);

        assert!(harness.use_case(params).execute(&mut memory).await.is_ok());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_surfaced() {
        let use_case = RunConsultationUseCase::new(
            Arc::new(ScriptedClient::happy()),
            Arc::new(RecordingValidator::default()),
            Arc::new(FailingSink),
            ConsultationParams::default(),
        );
        let mut memory = CaseMemory::new();

        let err = use_case.execute(&mut memory).await.unwrap_err();

        assert!(matches!(err, RunConsultationError::Persistence(_)));
        assert!(!err.is_service_error());
    }

    #[tokio::test]
    async fn test_progress_sees_stages_in_order() {
        let harness = Harness::new(ScriptedClient::happy());
        let progress = RecordingProgress::default();
        let mut memory = CaseMemory::new();

        harness
            .use_case(ConsultationParams::default())
            .execute_with_progress(&mut memory, &progress)
            .await
            .unwrap();

        assert_eq!(
            progress.completed.lock().unwrap().as_slice(),
            &Stage::ALL
        );
    }

    #[tokio::test]
    async fn test_conversation_events_are_logged() {
        let harness = Harness::new(ScriptedClient::happy());
        let logger = Arc::new(RecordingLogger::default());
        let mut memory = CaseMemory::new();

        harness
            .use_case(ConsultationParams::default())
            .with_conversation_logger(logger.clone())
            .execute(&mut memory)
            .await
            .unwrap();

        let events = logger.events.lock().unwrap().clone();
        assert_eq!(events.iter().filter(|e| **e == "completion_request").count(), 5);
        assert_eq!(events.iter().filter(|e| **e == "fact_validation").count(), 1);
        assert_eq!(events.last(), Some(&"case_persisted"));
    }

    #[tokio::test]
    async fn test_memory_grows_across_runs() {
        let mut memory = CaseMemory::new();

        for _ in 0..2 {
            let harness = Harness::new(ScriptedClient::happy());
            harness
                .use_case(ConsultationParams::default())
                .execute(&mut memory)
                .await
                .unwrap();
        }

        assert_eq!(memory.len(), 2);
    }
}
