//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use serde::Serialize;

use crate::db::repos::{EntitySummary, Genre, ShowSplit};

/// Search results page context
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchPage {
    pub fn new(search_term: String, data: Vec<EntitySummary>) -> Self {
        Self {
            search_term,
            results: SearchResults {
                count: data.len(),
                data,
            },
        }
    }
}

/// Past and upcoming shows of a detail page, with their counts
#[derive(Debug, Serialize)]
pub struct Schedule<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> From<ShowSplit<T>> for Schedule<T> {
    fn from(split: ShowSplit<T>) -> Self {
        Self {
            past_shows_count: split.past_count(),
            upcoming_shows_count: split.upcoming_count(),
            past_shows: split.past,
            upcoming_shows: split.upcoming,
        }
    }
}

fn genre_names(genres: Vec<Genre>) -> Vec<String> {
    genres.into_iter().map(|g| g.name).collect()
}
