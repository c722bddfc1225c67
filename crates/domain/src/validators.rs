pub fn validate_provider_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("provider name cannot be empty".to_string());
    }
    if name.len() > 200 {
        return Err("provider name cannot exceed 200 characters".to_string());
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), String> {
    if url.len() > 2048 {
        return Err("URL cannot exceed 2048 characters".to_string());
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }
    Ok(())
}

/// Light syntactic check before a name goes on the wire.
/// The wire encoder does the authoritative label checks.
pub fn validate_domain_name(domain: &str) -> Result<(), String> {
    if domain.is_empty() {
        return Err("domain cannot be empty".to_string());
    }
    if domain.len() > 253 {
        return Err("domain cannot exceed 253 characters".to_string());
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(format!("domain '{domain}' contains whitespace"));
    }
    if domain.split('.').any(|label| label.len() > 63) {
        return Err(format!("domain '{domain}' has a label longer than 63 characters"));
    }
    Ok(())
}
