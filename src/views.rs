//! Minimal HTML pages. Presentation only; every page shows the pending
//! flash message, if any.

use std::fmt::Write;

use crate::{
    models::{competence::Competence, flash::Flash, user::User},
    routes::{ADD_COMPETENCE, LOGIN, LOGOUT, REGISTER},
};

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash = flash
        .map(|flash| {
            format!(
                r#"<div class="flash {}">{}</div>"#,
                flash.level.as_str(),
                escape(&flash.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
{flash}
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<input type="text" name="username" required>
<input type="password" name="password" required>
<button type="submit">{submit}</button>
</form>"#
    )
}

pub fn register_page(flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>Inscription</h1>
{}
<p><a href="{LOGIN}">Déjà inscrit ? Connectez-vous</a></p>"#,
        credentials_form(REGISTER, "S'inscrire")
    );
    layout("Inscription", flash, &body)
}

pub fn login_page(flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>Connexion</h1>
{}
<p><a href="{REGISTER}">Créer un compte</a></p>"#,
        credentials_form(LOGIN, "Se connecter")
    );
    layout("Connexion", flash, &body)
}

pub fn dashboard_page(
    flash: Option<&Flash>,
    user: Option<&User>,
    competences: &[Competence],
) -> String {
    let mut body = String::from("<h1>Portfolio</h1>\n");

    match user {
        Some(user) => {
            let _ = writeln!(
                body,
                r#"<p>Connecté en tant que {} · <a href="{LOGOUT}">Déconnexion</a></p>"#,
                escape(&user.username)
            );
        }
        None => {
            let _ = writeln!(body, r#"<p><a href="{LOGIN}">Connexion</a></p>"#);
        }
    }

    body.push_str("<section id=\"services\">\n<h2>Compétences</h2>\n<ul>\n");
    for competence in competences {
        let _ = write!(
            body,
            "<li>{} · {} · {}",
            escape(&competence.nom),
            escape(&competence.niveau),
            escape(&competence.semestre)
        );
        if user.is_some() {
            let _ = write!(
                body,
                r#" <a href="/supprimer_competence/{}">Supprimer</a>"#,
                competence.id
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");

    if user.is_some() {
        let _ = writeln!(
            body,
            r#"<form method="post" action="{ADD_COMPETENCE}">
<input type="text" name="nom" required>
<input type="text" name="niveau" required>
<input type="text" name="semestre" required>
<button type="submit">Ajouter</button>
</form>"#
        );
    }
    body.push_str("</section>");

    layout("Portfolio", flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competence(id: i64, nom: &str) -> Competence {
        Competence {
            id,
            nom: nom.into(),
            niveau: "Intermediate".into(),
            semestre: "S1".into(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn dashboard_lists_competences_escaped() {
        let html = dashboard_page(None, None, &[competence(1, "Go"), competence(2, "<script>")]);

        assert!(html.contains("Go · Intermediate · S1"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("supprimer_competence"));
    }

    #[test]
    fn dashboard_offers_management_to_logged_in_users() {
        let user = User {
            id: 1,
            username: "alice".into(),
            password: "hash".into(),
        };
        let flash = Flash::success("Connexion réussie.");
        let html = dashboard_page(Some(&flash), Some(&user), &[competence(3, "Go")]);

        assert!(html.contains(r#"<div class="flash success">Connexion réussie.</div>"#));
        assert!(html.contains("alice"));
        assert!(html.contains("/supprimer_competence/3"));
        assert!(html.contains(r#"action="/ajouter_competence""#));
    }
}
