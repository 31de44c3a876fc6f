// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-rendered marketing pages.
//!
//! Each page body is a Handlebars template rendered first and then placed
//! unescaped into the shared `base` layout. Templates are compiled into the
//! binary.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Datelike, Utc};
use eerbeek_core::EerbeekError;
use handlebars::Handlebars;
use serde::Serialize;

use crate::server::WebState;

const BASE_TEMPLATE: &str = "base";

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Diensten,
    OverOns,
    Contact,
    Privacybeleid,
    NotFound,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Diensten,
        Page::OverOns,
        Page::Contact,
        Page::Privacybeleid,
        Page::NotFound,
    ];

    /// Template name, also used to mark the active navigation link.
    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Diensten => "diensten",
            Page::OverOns => "over-ons",
            Page::Contact => "contact",
            Page::Privacybeleid => "privacybeleid",
            Page::NotFound => "not-found",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Diensten => "Onze Diensten",
            Page::OverOns => "Over ICT Eerbeek",
            Page::Contact => "Contact",
            Page::Privacybeleid => "Privacybeleid",
            Page::NotFound => "Pagina niet gevonden",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Page::Home => {
                "ICT Eerbeek - Uw betrouwbare partner voor alle ICT-oplossingen in Eerbeek en omgeving. Netwerk & security, website ontwerp, IoT & AI oplossingen, en computerhulp."
            }
            Page::Diensten => {
                "Ontdek ons uitgebreide aanbod van ICT-oplossingen: netwerk & security, website & logo ontwerp, IoT & AI oplossingen, en all-round computerhulp."
            }
            Page::OverOns => {
                "Leer meer over ICT Eerbeek, ons team, onze missie en onze passie voor technologie. Uw betrouwbare ICT-partner in Eerbeek."
            }
            Page::Contact => {
                "Neem contact op met ICT Eerbeek voor al uw vragen over netwerk & security, website ontwerp, IoT & AI oplossingen, en computerhulp."
            }
            Page::Privacybeleid => {
                "Lees het privacybeleid van ICT Eerbeek. Wij respecteren uw privacy en zorgen voor een veilige verwerking van uw persoonsgegevens."
            }
            Page::NotFound => "De opgevraagde pagina bestaat niet.",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Page::Home => include_str!("../templates/home.hbs"),
            Page::Diensten => include_str!("../templates/diensten.hbs"),
            Page::OverOns => include_str!("../templates/over-ons.hbs"),
            Page::Contact => include_str!("../templates/contact.hbs"),
            Page::Privacybeleid => include_str!("../templates/privacybeleid.hbs"),
            Page::NotFound => include_str!("../templates/not-found.hbs"),
        }
    }
}

#[derive(Serialize)]
struct PageContext<'a> {
    site_name: &'a str,
    title: &'a str,
    description: &'a str,
    page: &'a str,
    year: i32,
    chat_enabled: bool,
    content: String,
}

/// Handlebars registry holding the layout and every page body.
pub struct PageRenderer {
    registry: Handlebars<'static>,
    site_name: String,
}

impl PageRenderer {
    /// Compile all embedded templates.
    pub fn new(site_name: impl Into<String>) -> Result<Self, EerbeekError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(BASE_TEMPLATE, include_str!("../templates/base.hbs"))
            .map_err(|e| EerbeekError::Internal(format!("invalid template `base`: {e}")))?;
        for page in Page::ALL {
            registry
                .register_template_string(page.name(), page.source())
                .map_err(|e| {
                    EerbeekError::Internal(format!("invalid template `{}`: {e}", page.name()))
                })?;
        }
        Ok(Self {
            registry,
            site_name: site_name.into(),
        })
    }

    /// Render `page` inside the base layout.
    pub fn render(&self, page: Page, chat_enabled: bool) -> Result<String, EerbeekError> {
        let mut ctx = PageContext {
            site_name: &self.site_name,
            title: page.title(),
            description: page.description(),
            page: page.name(),
            year: Utc::now().year(),
            chat_enabled,
            content: String::new(),
        };
        ctx.content = self
            .registry
            .render(page.name(), &ctx)
            .map_err(|e| EerbeekError::Internal(format!("failed to render `{}`: {e}", page.name())))?;
        self.registry
            .render(BASE_TEMPLATE, &ctx)
            .map_err(|e| EerbeekError::Internal(format!("failed to render layout: {e}")))
    }
}

fn render_page(state: &WebState, page: Page, status: StatusCode) -> Response {
    match state.pages.render(page, state.chat.is_some()) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, page = page.name(), "page rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Interne serverfout").into_response()
        }
    }
}

/// GET /
pub async fn home(State(state): State<WebState>) -> Response {
    render_page(&state, Page::Home, StatusCode::OK)
}

/// GET /diensten
pub async fn diensten(State(state): State<WebState>) -> Response {
    render_page(&state, Page::Diensten, StatusCode::OK)
}

/// GET /over-ons
pub async fn over_ons(State(state): State<WebState>) -> Response {
    render_page(&state, Page::OverOns, StatusCode::OK)
}

/// GET /contact
pub async fn contact(State(state): State<WebState>) -> Response {
    render_page(&state, Page::Contact, StatusCode::OK)
}

/// GET /privacybeleid
pub async fn privacybeleid(State(state): State<WebState>) -> Response {
    render_page(&state, Page::Privacybeleid, StatusCode::OK)
}

/// Fallback for unknown routes.
pub async fn not_found(State(state): State<WebState>) -> Response {
    render_page(&state, Page::NotFound, StatusCode::NOT_FOUND)
}
