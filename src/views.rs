//! HTML pages rendered with Handlebars.
//!
//! Templates are compiled into the binary and registered once at startup.

use handlebars::Handlebars;
use serde::Serialize;

use crate::{
    api::notice::Notice,
    error::AppResult,
    models::{author::Author, book::BookWithAuthor},
};

pub const HOME_TEMPLATE: &str = "home";
pub const ADD_AUTHOR_TEMPLATE: &str = "add_author";
pub const ADD_BOOK_TEMPLATE: &str = "add_book";

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
];

const TEMPLATES: [(&str, &str); 3] = [
    (HOME_TEMPLATE, include_str!("../templates/home.hbs")),
    (ADD_AUTHOR_TEMPLATE, include_str!("../templates/add_author.hbs")),
    (ADD_BOOK_TEMPLATE, include_str!("../templates/add_book.hbs")),
];

/// Book list with the search form
#[derive(Debug, Serialize)]
pub struct HomePage<'a> {
    pub page_title: &'static str,
    pub books: &'a [BookWithAuthor],
    pub query: Option<&'a str>,
    pub sort: Option<&'static str>,
    pub notice: Option<&'a Notice>,
}

/// Author creation form
#[derive(Debug, Serialize)]
pub struct AddAuthorPage<'a> {
    pub page_title: &'static str,
    pub notice: Option<&'a Notice>,
}

/// Book creation form with the author choices
#[derive(Debug, Serialize)]
pub struct AddBookPage<'a> {
    pub page_title: &'static str,
    pub authors: &'a [Author],
    pub notice: Option<&'a Notice>,
}

#[derive(Clone)]
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self { registry })
    }

    pub fn home(&self, page: &HomePage<'_>) -> AppResult<String> {
        self.render(HOME_TEMPLATE, page)
    }

    pub fn add_author(&self, page: &AddAuthorPage<'_>) -> AppResult<String> {
        self.render(ADD_AUTHOR_TEMPLATE, page)
    }

    pub fn add_book(&self, page: &AddBookPage<'_>) -> AppResult<String> {
        self.render(ADD_BOOK_TEMPLATE, page)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<String> {
        Ok(self.registry.render(name, data)?)
    }
}
