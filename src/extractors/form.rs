use crate::{error, Error};
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use bytes::Bytes;
use std::{collections::HashMap, str::FromStr};

/// An uploaded file.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

/// A `multipart/form-data` body made of text fields and at most one `document` file.
#[derive(Debug, Default)]
pub struct DocumentForm {
    fields: HashMap<String, String>,
    pub document: Option<Upload>,
}

impl DocumentForm {
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Parses a field, `None` if the field is absent.
    pub fn parse<T: FromStr>(&mut self, name: &str) -> Result<Option<T>, Error<'static>> {
        self.text(name)
            .map(|value| value.trim().parse().map_err(|_| error::MULTIPART_INVALID))
            .transpose()
    }

    pub fn required_document(&mut self) -> Result<Upload, Error<'static>> {
        self.document.take().ok_or(error::MISSING_DOCUMENT)
    }
}

#[async_trait]
impl<S> FromRequest<S> for DocumentForm
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|_| error::MULTIPART_INVALID)?;

        let mut form = DocumentForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| error::MULTIPART_INVALID)?
        {
            let Some(name) = field.name().map(ToOwned::to_owned) else {
                continue;
            };

            if name == "document" {
                let file_name = field.file_name().unwrap_or("document").to_owned();
                let data = field.bytes().await.map_err(|_| error::MULTIPART_INVALID)?;

                // browsers send an empty part when no file was picked
                if !data.is_empty() {
                    form.document = Some(Upload { file_name, data });
                }
            } else {
                let value = field.text().await.map_err(|_| error::MULTIPART_INVALID)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}
