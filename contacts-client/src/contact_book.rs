use crate::api::ContactsApi;
use crate::models::contact::{Contact, ContactForm, Field};
use crate::validation::{validate_email, validate_phone};
use log::error;

/// State behind the contact view: the fetched contacts, the form, the contact
/// being edited and the two format messages.
///
/// Every write is followed by a full refetch, nothing is updated locally.
/// Network failures are logged and otherwise ignored.
pub struct ContactBook<A: ContactsApi> {
    api: A,
    contacts: Vec<Contact>,
    form: ContactForm,
    editing: Option<String>,
    email_error: String,
    phone_error: String,
}

impl<A: ContactsApi> ContactBook<A> {
    pub fn new(api: A) -> Self {
        ContactBook {
            api,
            contacts: Vec::new(),
            form: ContactForm::default(),
            editing: None,
            email_error: String::new(),
            phone_error: String::new(),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Id of the contact a submit will update, `None` in create mode
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn email_error(&self) -> &str {
        &self.email_error
    }

    pub fn phone_error(&self) -> &str {
        &self.phone_error
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update Contact"
        } else {
            "Add Contact"
        }
    }

    pub async fn mount(&mut self) {
        self.fetch_contacts().await;
    }

    pub async fn fetch_contacts(&mut self) {
        match self.api.list().await {
            Ok(contacts) => self.contacts = contacts,
            Err(error) => error!("Error fetching contacts: {error}"),
        }
    }

    /// Stores a form value, re-checking the format of email and phone
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Email => self.email_error = validate_email(&value).to_string(),
            Field::Phone => self.phone_error = validate_phone(&value).to_string(),
            Field::Name => (),
        }
        self.form.set(field, value);
    }

    /// Creates or updates depending on edit mode. Format messages don't block it.
    pub async fn submit(&mut self) {
        let result = match &self.editing {
            Some(id) => self.api.update(id, &self.form).await,
            None => self.api.create(&self.form).await.map(|_| ()),
        };

        if let Err(error) = result {
            error!("Error adding/updating contact: {error}");
            return;
        }

        self.form = ContactForm::default();
        self.editing = None;
        self.fetch_contacts().await;
    }

    pub fn edit(&mut self, contact: &Contact) {
        self.form = ContactForm::from(contact);
        self.editing = Some(contact.id.clone());
    }

    pub async fn delete(&mut self, id: &str) {
        match self.api.delete(id).await {
            Ok(()) => self.fetch_contacts().await,
            Err(error) => error!("Error deleting contact: {error}"),
        }
    }
}
