use chrono::Utc;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::Config;
use crate::routes::contact::ContactRequest;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("adresse invalide: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("construction du message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("transport SMTP: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Transport SMTP construit une fois au démarrage et partagé via l'état.
/// La boîte `email_user` sert à la fois d'expéditeur et de destinataire :
/// le site envoie les demandes de contact à l'entreprise elle-même.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: String,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.email_host)?
            .port(config.email_port)
            .credentials(Credentials::new(
                config.email_user.clone(),
                config.email_pass.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            mailbox: config.email_user.clone(),
        })
    }

    /// Notification envoyée à l'entreprise, avec le visiteur en reply-to.
    pub async fn send_contact(&self, req: &ContactRequest) -> Result<(), MailError> {
        let from: Mailbox = format!("\"{}\" <{}>", req.nom.replace('"', ""), self.mailbox).parse()?;
        let reply_to: Mailbox = req.email.parse()?;
        let to: Mailbox = self.mailbox.parse()?;

        let subject = format!(
            "Nouveau contact: {}",
            req.sujet.as_deref().unwrap_or("Demande de contact")
        );

        let message = Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(contact_body(req))?;

        self.transport.send(message).await?;
        Ok(())
    }

    /// Vérification de la configuration SMTP (endpoint de test).
    pub async fn test_connection(&self) -> Result<bool, MailError> {
        Ok(self.transport.test_connection().await?)
    }
}

fn contact_body(req: &ContactRequest) -> String {
    let telephone = match req.telephone.as_deref() {
        Some(t) if !t.is_empty() => format!("<p><strong>Téléphone:</strong> {}</p>", t),
        _ => String::new(),
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px;">
        Nouveau message de contact
    </h2>

    <div style="background: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;">
        <p><strong>Nom:</strong> {nom}</p>
        <p><strong>Email:</strong> {email}</p>
        {telephone}
        <p><strong>Sujet:</strong> {sujet}</p>
    </div>

    <div style="background: white; padding: 20px; border-left: 4px solid #3498db;">
        <h3 style="color: #2c3e50; margin-top: 0;">Message:</h3>
        <p style="line-height: 1.6; color: #555;">{message}</p>
    </div>

    <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #777;">
        <p>Email envoyé depuis le site web de SARL Jérémie Arrivé</p>
        <p>Date: {date}</p>
    </div>
</div>"#,
        nom = req.nom,
        email = req.email,
        telephone = telephone,
        sujet = req.sujet.as_deref().unwrap_or("Non spécifié"),
        message = req.message,
        date = Utc::now().format("%d/%m/%Y %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            nom: "Jean Dupont".into(),
            email: "jean@example.com".into(),
            telephone: Some("0601020304".into()),
            sujet: None,
            message: "Fuite sous l'évier de la cuisine.".into(),
        }
    }

    #[test]
    fn body_contains_submitted_fields() {
        let body = contact_body(&request());
        assert!(body.contains("Jean Dupont"));
        assert!(body.contains("jean@example.com"));
        assert!(body.contains("0601020304"));
        assert!(body.contains("Fuite sous l'évier"));
        assert!(body.contains("Non spécifié"));
    }

    #[test]
    fn body_omits_missing_telephone() {
        let mut req = request();
        req.telephone = None;
        assert!(!contact_body(&req).contains("Téléphone"));
    }
}
