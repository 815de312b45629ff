use super::TechnicianError;
use crate::model::validation::{contains_term, Violations};
use crate::model::{Technician, TechnicianCreate, TechnicianId, TechnicianUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::cmp::Ordering;

const MIN_PHONE_DIGITS: usize = 10;

fn validate(name: &str, email: &str, phone: &str) -> Result<(), TechnicianError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    Violations::new()
        .required("name", name)
        .min_chars("name", name, 3)
        .required("email", email)
        .email("email", email)
        .required("phone", phone)
        .check(
            phone.trim().is_empty() || digits >= MIN_PHONE_DIGITS,
            format!("phone must have at least {MIN_PHONE_DIGITS} digits"),
        )
        .into_result()
        .map_err(TechnicianError::Validation)
}

#[async_trait]
impl ActorEntity for Technician {
    type Id = TechnicianId;
    type Create = TechnicianCreate;
    type Update = TechnicianUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = TechnicianError;

    fn id(&self) -> &TechnicianId {
        &self.id
    }

    fn from_create_params(id: TechnicianId, params: TechnicianCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            specialty: params.specialty,
            is_active: params.is_active,
        })
    }

    fn prepare_create(
        params: TechnicianCreate,
        _: &[&Self],
        _: &(),
    ) -> Result<TechnicianCreate, TechnicianError> {
        validate(&params.name, &params.email, &params.phone)?;
        Ok(params)
    }

    fn matches(&self, term: &str) -> bool {
        contains_term(&self.name, term)
            || contains_term(&self.email, term)
            || contains_term(&self.specialty, term)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    async fn on_update(&mut self, update: TechnicianUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(specialty) = update.specialty {
            self.specialty = specialty;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        validate(&self.name, &self.email, &self.phone)
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_needs_ten_digits() {
        let short = TechnicianCreate::new("Carlos Lima", "carlos@elevadores.com", "9999-999");
        assert!(matches!(
            Technician::prepare_create(short, &[], &()),
            Err(TechnicianError::Validation(msg)) if msg.contains("10 digits")
        ));

        let ok = TechnicianCreate::new("Carlos Lima", "carlos@elevadores.com", "(11) 98765-4321");
        let prepared = Technician::prepare_create(ok, &[], &()).unwrap();
        assert_eq!(prepared.specialty, "Mecânica");
    }

    #[test]
    fn test_email_is_required() {
        let draft = TechnicianCreate::new("Carlos Lima", "", "(11) 98765-4321");
        assert!(matches!(
            Technician::prepare_create(draft, &[], &()),
            Err(TechnicianError::Validation(msg)) if msg.contains("email is required")
        ));
    }
}
