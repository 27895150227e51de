use crate::certificate::CertificateRequest;

/// Instruction sent to the text service. The completion date is not part of it.
pub fn build_prompt(request: &CertificateRequest) -> String {
    format!(
        r#"Write a formal, professional, and unique single-paragraph certificate recognition statement (approx 30-40 words) for a student named "{name}".
They are currently studying "{inst_course}" at "{inst_name}".
They have successfully completed the course "{web_course}" on our platform.
Do not start with "This certifies that". Make it sound appreciative.
Only return the paragraph text, nothing else."#,
        name = request.name,
        inst_course = request.institution_course,
        inst_name = request.institution_name,
        web_course = request.platform_course,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_every_field_but_the_date() {
        let request = CertificateRequest {
            name: "Grace Hopper".into(),
            institution_name: "Yale".into(),
            institution_course: "Mathematics".into(),
            platform_course: "Compilers 101".into(),
            manager_name: "R. Aiken".into(),
            completion_date: "1952-05-01".into(),
        };
        let prompt = build_prompt(&request);
        for needle in ["\"Grace Hopper\"", "\"Yale\"", "\"Mathematics\"", "\"Compilers 101\""] {
            assert!(prompt.contains(needle), "prompt is missing {needle}");
        }
        assert!(prompt.contains("30-40 words"));
        assert!(!prompt.contains("1952"));
        assert!(!prompt.contains("R. Aiken"));
    }
}
