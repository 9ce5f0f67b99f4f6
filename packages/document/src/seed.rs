//! Initial dataset loaded when no document exists yet

use crate::model::{Block, Category, Chain, Document, Funnel, LandingPage, Page, Subcategory};

pub fn initial_document() -> Document {
    Document::new(vec![
        Chain {
            id: "chain-sol".to_string(),
            name: "Sol Resorts".to_string(),
            primary_color: "#f59e0b".to_string(),
            categories: vec![
                Category {
                    id: "cat-hotels".to_string(),
                    name: "Hotels".to_string(),
                    subcategories: vec![
                        Subcategory {
                            id: "sub-beach".to_string(),
                            name: "Beach".to_string(),
                            landing_pages: vec![
                                LandingPage {
                                    id: "lp-summer".to_string(),
                                    name: "Summer Escape".to_string(),
                                    slug: "summer-escape".to_string(),
                                    funnels: vec![early_booking_funnel()],
                                },
                                LandingPage {
                                    id: "lp-family".to_string(),
                                    name: "Family Week".to_string(),
                                    slug: "family-week".to_string(),
                                    funnels: vec![],
                                },
                            ],
                        },
                        Subcategory {
                            id: "sub-city".to_string(),
                            name: "City".to_string(),
                            landing_pages: vec![],
                        },
                    ],
                },
                Category {
                    id: "cat-experiences".to_string(),
                    name: "Experiences".to_string(),
                    subcategories: vec![],
                },
            ],
        },
        Chain {
            id: "chain-andes".to_string(),
            name: "Andes Travel".to_string(),
            primary_color: "#0ea5e9".to_string(),
            categories: vec![Category {
                id: "cat-tours".to_string(),
                name: "Tours".to_string(),
                subcategories: vec![Subcategory {
                    id: "sub-trekking".to_string(),
                    name: "Trekking".to_string(),
                    landing_pages: vec![LandingPage {
                        id: "lp-inca".to_string(),
                        name: "Inca Trail".to_string(),
                        slug: "inca-trail".to_string(),
                        funnels: vec![],
                    }],
                }],
            }],
        },
    ])
}

fn early_booking_funnel() -> Funnel {
    Funnel {
        id: "funnel-early".to_string(),
        name: "Early Booking".to_string(),
        pages: vec![
            Page {
                id: "page-early-home".to_string(),
                name: "Home".to_string(),
                blocks: vec![
                    Block::new("block-hero", "hero")
                        .with_prop("title", "Book early, pay less")
                        .with_prop("image", "/assets/beach.jpg"),
                    Block::new("block-form", "form")
                        .with_prop("fields", serde_json::json!(["name", "email", "dates"]))
                        .with_prop("submitLabel", "Reserve"),
                ],
            },
            Page {
                id: "page-early-thanks".to_string(),
                name: "Thank you".to_string(),
                blocks: vec![Block::new("block-thanks", "text")
                    .with_prop("content", "We will contact you shortly.")],
            },
        ],
    }
}
