//! [`ActorEntity`] implementation for [`Customer`].

use super::CustomerError;
use crate::model::validation::{contains_term, Violations};
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;

fn validate(
    name: &str,
    document: &str,
    address: &str,
    contact_name: &str,
    email: &str,
) -> Result<(), CustomerError> {
    Violations::new()
        .required("name", name)
        .min_chars("name", name, 3)
        .required("document", document)
        .required("address", address)
        .required("contact name", contact_name)
        .email("email", email)
        .into_result()
        .map_err(CustomerError::Validation)
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn id(&self) -> &CustomerId {
        &self.id
    }

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
            document: params.document,
            address: params.address,
            contact_name: params.contact_name,
            phone: params.phone,
            email: params.email,
            active: true,
            created_at: Some(Utc::now()),
            lat: None,
            lng: None,
        })
    }

    fn prepare_create(
        params: CustomerCreate,
        _: &[&Self],
        _: &(),
    ) -> Result<CustomerCreate, CustomerError> {
        validate(
            &params.name,
            &params.document,
            &params.address,
            &params.contact_name,
            &params.email,
        )?;
        Ok(CustomerCreate {
            name: params.name.trim().to_string(),
            email: params.email.trim().to_string(),
            ..params
        })
    }

    fn matches(&self, term: &str) -> bool {
        contains_term(&self.name, term)
            || contains_term(&self.document, term)
            || contains_term(&self.contact_name, term)
            || contains_term(&self.address, term)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.name.to_lowercase().cmp(&other.name.to_lowercase())
    }

    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(document) = update.document {
            self.document = document;
        }
        if let Some(address) = update.address {
            // A moved site has to be geocoded again.
            if address != self.address {
                self.lat = None;
                self.lng = None;
            }
            self.address = address;
        }
        if let Some(contact_name) = update.contact_name {
            self.contact_name = contact_name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some((lat, lng)) = update.coordinates {
            self.lat = Some(lat);
            self.lng = Some(lng);
        }
        validate(
            &self.name,
            &self.document,
            &self.address,
            &self.contact_name,
            &self.email,
        )
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
