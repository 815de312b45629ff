//! # REST Resource
//!
//! [`RemoteSource`] over one JSON collection of the maintenance API:
//!
//! | operation | request |
//! |-----------|---------|
//! | list      | `GET {base}{path}` |
//! | create    | `POST {base}{path}` with the draft |
//! | update    | `PUT` or `PATCH {base}{path}/{id}` with the merged entity |
//! | delete    | `DELETE {base}{path}/{id}` |
//!
//! Non-2xx answers become [`RemoteError::Status`] carrying the body text, transport failures
//! [`RemoteError::Unreachable`], and bodies that do not match the model [`RemoteError::Decode`].

use actor_framework::{ActorEntity, RemoteError, RemoteSource};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Classifies a transport-level reqwest failure.
fn transport(e: reqwest::Error) -> RemoteError {
    if e.is_decode() {
        RemoteError::Decode(e.to_string())
    } else if let Some(status) = e.status() {
        RemoteError::Status {
            status: status.as_u16(),
            message: e.to_string(),
        }
    } else {
        RemoteError::Unreachable(e.to_string())
    }
}

/// HTTP verb used to store an edited entity. The orders endpoint takes `PATCH`, the others `PUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

impl From<UpdateMethod> for Method {
    fn from(method: UpdateMethod) -> Self {
        match method {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        }
    }
}

pub struct RestResource<T> {
    client: Client,
    url: String,
    update_method: UpdateMethod,
    _entity: PhantomData<fn() -> T>,
}

impl<T> RestResource<T> {
    /// `path` is the collection path, e.g. `/customers`.
    pub fn new(client: Client, base_url: &str, path: &str, update_method: UpdateMethod) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
            update_method,
            _entity: PhantomData,
        }
    }

    fn item_url(&self, id: &impl std::fmt::Display) -> String {
        format!("{}/{}", self.url, id)
    }
}

/// Turns a non-2xx answer into a [`RemoteError::Status`], keeping the server's message.
async fn check(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
    })
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, RemoteError> {
    let body = check(response).await?.bytes().await.map_err(transport)?;
    serde_json::from_slice(&body).map_err(|e| RemoteError::Decode(e.to_string()))
}

#[async_trait]
impl<T> RemoteSource<T> for RestResource<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
    T::Create: Serialize,
{
    #[instrument(skip(self), fields(url = %self.url))]
    async fn list(&self) -> Result<Vec<T>, RemoteError> {
        let response = self.client.get(&self.url).send().await.map_err(transport)?;
        let items: Vec<T> = decode(response).await?;
        debug!(count = items.len(), "Listed");
        Ok(items)
    }

    #[instrument(skip_all, fields(url = %self.url))]
    async fn create(&self, params: &T::Create) -> Result<T, RemoteError> {
        let response = self
            .client
            .post(&self.url)
            .json(params)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self, entity), fields(url = %self.url))]
    async fn update(&self, id: &T::Id, entity: &T) -> Result<T, RemoteError> {
        let response = self
            .client
            .request(self.update_method.into(), self.item_url(id))
            .json(entity)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}
