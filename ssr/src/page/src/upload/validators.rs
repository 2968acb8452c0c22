use consts::limits::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};

pub fn title_validator(title: String) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Please enter a title".into());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }

    Ok(title.to_string())
}

pub fn description_validator(description: String) -> Result<String, String> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        ));
    }

    Ok(description.trim().to_string())
}
