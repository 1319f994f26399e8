//! Prompt templates for the consultation flow

/// Templates for the user/assistant turns of each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the symptom generator
    pub fn symptom_generator_system() -> &'static str {
        "You are a simulated patient generator. Create a *new, realistic* symptom description \
         every time, with variety across domains: respiratory, neurological, digestive, skin, \
         cardiac, etc. Keep it concise but vivid."
    }

    /// Fixed user prompt asking for one novel symptom
    pub fn symptom_request() -> &'static str {
        "Generate a unique patient symptom."
    }

    /// Assistant-authored context carrying the memory recall
    pub fn memory_recall(similar_case: &str) -> String {
        format!("Memory recall: {}", similar_case)
    }

    /// User prompt for the pharmacist, embedding the diagnosis verbatim
    pub fn pharmacist_request(diagnosis: &str) -> String {
        format!(
            r#"Diagnosis: {}

Provide a recommended medication name, dosage, interaction warnings, and general advice. Respond ONLY in JSON format:
{{
  "medication": "...",
  "dosage": "...",
  "interactions": "...",
  "advice": "..."
}}"#,
            diagnosis
        )
    }

    /// Text handed to the fact validator
    pub fn validation_query(diagnosis: &str, medication_info: &str) -> String {
        format!("Diagnosis: {}. Drug info: {}", diagnosis, medication_info)
    }

    pub fn patient_symptoms(symptoms: &str) -> String {
        format!("Patient symptoms: {}", symptoms)
    }

    pub fn doctor_response(diagnosis: &str) -> String {
        format!("Doctor response: {}", diagnosis)
    }

    pub fn pharmacist_suggestion(medication_info: &str) -> String {
        format!("Pharmacist suggested: {}", medication_info)
    }

    pub fn knowledge_validation(validation: &str) -> String {
        format!("Validated against knowledge base: {}", validation)
    }

    /// User prompt asking the patient for a one-line verdict
    pub fn feedback_request(summary: &str) -> String {
        format!(
            "This was the advice: {}\nWas it useful or not? Respond in one line.",
            summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pharmacist_request_embeds_diagnosis() {
        let prompt = PromptTemplate::pharmacist_request("Acute bronchitis");
        assert!(prompt.starts_with("Diagnosis: Acute bronchitis\n\n"));
        for field in ["medication", "dosage", "interactions", "advice"] {
            assert!(prompt.contains(&format!("\"{}\"", field)));
        }
    }

    #[test]
    fn test_validation_query_joins_both_outputs() {
        let query = PromptTemplate::validation_query("Migraine", "{\"medication\":\"x\"}");
        assert_eq!(query, "Diagnosis: Migraine. Drug info: {\"medication\":\"x\"}");
    }

    #[test]
    fn test_feedback_request_quotes_summary() {
        let prompt = PromptTemplate::feedback_request("Rest and fluids");
        assert!(prompt.contains("This was the advice: Rest and fluids\n"));
        assert!(prompt.ends_with("Respond in one line."));
    }
}
