use consts::limits::{MAX_NAME_LEN, MIN_PASSWORD_LEN};

pub fn email_validator(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email address".into());
    }

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !email.contains(char::is_whitespace)
    });
    if !valid {
        return Err("Please enter a valid email address".into());
    }

    Ok(())
}

pub fn password_validator(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Please enter your password".into());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }

    Ok(())
}

pub fn name_validator(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Please enter your name".into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {MAX_NAME_LEN} characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_local_part_and_domain() {
        assert!(email_validator("ann@example.com").is_ok());
        assert!(email_validator("  ann@example.com ").is_ok());
        assert_eq!(
            email_validator(""),
            Err("Please enter your email address".into())
        );
        for bad in ["ann", "@example.com", "ann@", "a@b@c", "an n@example.com"] {
            assert_eq!(
                email_validator(bad),
                Err("Please enter a valid email address".into()),
                "{bad}"
            );
        }
    }

    #[test]
    fn password_has_minimum_length() {
        assert_eq!(
            password_validator(""),
            Err("Please enter your password".into())
        );
        assert!(password_validator("12345").is_err());
        assert!(password_validator("123456").is_ok());
    }

    #[test]
    fn name_is_required_and_bounded() {
        assert!(name_validator("   ").is_err());
        assert!(name_validator("Ann").is_ok());
        assert!(name_validator(&"a".repeat(MAX_NAME_LEN)).is_ok());
        assert!(name_validator(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
    }
}
