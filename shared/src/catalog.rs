//! Projection of discovery records into [`Movie`]s and the bounded paging
//! loop shared by the trending and by-genre fetches.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{CatalogPage, CatalogRecord};
use crate::config::CatalogSource;
use crate::model::{Genre, Movie};
use crate::{Operation, MAX_CATALOG_MOVIES, MAX_CATALOG_PAGES, MAX_GENRES_PER_MOVIE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchId(pub Uuid);

impl FetchId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for FetchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Maps one record, or `None` when it has no backdrop image.
///
/// Genre ids missing from `genres` are skipped; at most
/// [`MAX_GENRES_PER_MOVIE`] names are kept, in record order.
pub fn project(record: &CatalogRecord, genres: &[Genre]) -> Option<Movie> {
    let image = record.backdrop_path.as_deref().filter(|path| !path.is_empty())?;

    let names = record
        .genre_ids
        .iter()
        .filter_map(|id| genres.iter().find(|genre| genre.id == *id))
        .map(|genre| genre.name.clone())
        .take(MAX_GENRES_PER_MOVIE)
        .collect();

    let name = record
        .original_name
        .as_ref()
        .filter(|name| !name.is_empty())
        .or(record.original_title.as_ref())
        .cloned()
        .unwrap_or_default();

    Some(Movie {
        id: record.id,
        name,
        image: image.to_string(),
        genres: names,
    })
}

pub fn project_into(records: &[CatalogRecord], genres: &[Genre], out: &mut Vec<Movie>) {
    out.extend(records.iter().filter_map(|record| project(record, genres)));
}

/// State of one in-flight paged fetch. It travels inside the request
/// callback, so concurrent fetches never share an accumulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogFetch {
    pub id: FetchId,
    pub source: CatalogSource,
    /// Genre catalog as it was when the fetch started.
    pub genres: Vec<Genre>,
    pub pages_requested: u32,
    pub movies: Vec<Movie>,
}

impl CatalogFetch {
    pub fn new(source: CatalogSource, genres: Vec<Genre>) -> Self {
        Self {
            id: FetchId::generate(),
            source,
            genres,
            pages_requested: 0,
            movies: Vec::new(),
        }
    }

    pub fn operation(&self) -> Operation {
        match self.source {
            CatalogSource::Discover { .. } => Operation::FetchMovies,
            CatalogSource::Genre { .. } => Operation::FetchByGenre,
        }
    }

    /// The 1-based page to request next, or `None` once the movie cap or the
    /// page budget is reached.
    pub fn next_page(&self) -> Option<u32> {
        if self.movies.len() < MAX_CATALOG_MOVIES && self.pages_requested < MAX_CATALOG_PAGES {
            Some(self.pages_requested + 1)
        } else {
            None
        }
    }

    /// Records that `page` has been requested.
    pub fn mark_requested(&mut self, page: u32) {
        self.pages_requested = page;
    }

    pub fn absorb(&mut self, page: &CatalogPage) {
        project_into(&page.results, &self.genres, &mut self.movies);
    }

    pub fn finish(mut self) -> Vec<Movie> {
        self.movies.truncate(MAX_CATALOG_MOVIES);
        self.movies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GenreId, MediaType, MovieId};
    use proptest::prelude::*;

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: GenreId(1),
                name: "Action".into(),
            },
            Genre {
                id: GenreId(2),
                name: "Drama".into(),
            },
        ]
    }

    fn record(id: u64, genre_ids: &[u64], backdrop: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            id: MovieId(id),
            genre_ids: genre_ids.iter().copied().map(GenreId).collect(),
            backdrop_path: backdrop.map(str::to_string),
            original_title: Some(format!("Title {id}")),
            original_name: None,
        }
    }

    fn full_page(start: u64, len: u64) -> CatalogPage {
        CatalogPage {
            results: (start..start + len)
                .map(|id| record(id, &[1], Some("/b.jpg")))
                .collect(),
        }
    }

    fn discover() -> CatalogSource {
        CatalogSource::Discover {
            media_type: MediaType::Movie,
        }
    }

    #[test]
    fn unresolved_genre_is_dropped() {
        let raw = CatalogRecord {
            id: MovieId(10),
            genre_ids: vec![GenreId(1), GenreId(2), GenreId(99)],
            backdrop_path: Some("/x.jpg".into()),
            original_title: Some("T".into()),
            original_name: None,
        };

        let movie = project(&raw, &genres()).unwrap();

        assert_eq!(
            movie,
            Movie {
                id: MovieId(10),
                name: "T".into(),
                image: "/x.jpg".into(),
                genres: vec!["Action".into(), "Drama".into()],
            }
        );
    }

    #[test]
    fn record_without_backdrop_is_skipped() {
        assert!(project(&record(1, &[1], None), &genres()).is_none());
        assert!(project(&record(1, &[1], Some("")), &genres()).is_none());
    }

    #[test]
    fn original_name_wins_over_title() {
        let mut raw = record(3, &[], Some("/tv.jpg"));
        raw.original_name = Some("Show".into());
        assert_eq!(project(&raw, &genres()).unwrap().name, "Show");
    }

    #[test]
    fn empty_original_name_falls_back_to_title() {
        let mut raw = record(4, &[], Some("/film.jpg"));
        raw.original_name = Some(String::new());
        raw.original_title = Some("Title".into());
        assert_eq!(project(&raw, &genres()).unwrap().name, "Title");
    }

    #[test]
    fn at_most_three_genres() {
        let many: Vec<Genre> = (1..=5)
            .map(|id| Genre {
                id: GenreId(id),
                name: format!("G{id}"),
            })
            .collect();
        let movie = project(&record(1, &[5, 4, 3, 2, 1], Some("/a.jpg")), &many).unwrap();
        assert_eq!(movie.genres, vec!["G5", "G4", "G3"]);
    }

    #[test]
    fn stops_after_sixty_movies() {
        let mut fetch = CatalogFetch::new(discover(), genres());
        let mut requests = 0;
        while let Some(page) = fetch.next_page() {
            fetch.mark_requested(page);
            requests += 1;
            fetch.absorb(&full_page(u64::from(page) * 100, 25));
        }
        assert_eq!(requests, 3);
        assert_eq!(fetch.finish().len(), MAX_CATALOG_MOVIES);
    }

    #[test]
    fn stops_after_nine_pages() {
        let mut fetch = CatalogFetch::new(discover(), genres());
        let mut requests = 0;
        while let Some(page) = fetch.next_page() {
            fetch.mark_requested(page);
            requests += 1;
            fetch.absorb(&full_page(u64::from(page) * 100, 2));
        }
        assert_eq!(requests, MAX_CATALOG_PAGES);
        assert_eq!(fetch.finish().len(), 18);
    }

    #[test]
    fn fetch_ids_are_unique() {
        assert_ne!(FetchId::generate(), FetchId::generate());
    }

    fn arb_record() -> impl Strategy<Value = CatalogRecord> {
        (
            any::<u64>(),
            prop::collection::vec(0u64..8, 0..8),
            prop::option::of(prop::sample::select(vec!["", "/a.jpg", "/b.jpg"])),
        )
            .prop_map(|(id, genre_ids, backdrop)| record(id, &genre_ids, backdrop))
    }

    fn arb_genres() -> impl Strategy<Value = Vec<Genre>> {
        prop::collection::vec((0u64..8, "[A-Z][a-z]{2,8}"), 0..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(id, name)| Genre {
                    id: GenreId(id),
                    name,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn projection_never_keeps_missing_backdrops(
            records in prop::collection::vec(arb_record(), 0..40),
            catalog in arb_genres(),
        ) {
            let mut out = Vec::new();
            project_into(&records, &catalog, &mut out);

            let qualifying = records
                .iter()
                .filter(|r| r.backdrop_path.as_deref().is_some_and(|p| !p.is_empty()))
                .count();
            prop_assert_eq!(out.len(), qualifying);
            prop_assert!(out.iter().all(|m| !m.image.is_empty()));
        }

        #[test]
        fn projected_genres_come_from_the_record(
            raw in arb_record(),
            catalog in arb_genres(),
        ) {
            if let Some(movie) = project(&raw, &catalog) {
                prop_assert!(movie.genres.len() <= MAX_GENRES_PER_MOVIE);
                for name in &movie.genres {
                    let backed = catalog
                        .iter()
                        .any(|g| &g.name == name && raw.genre_ids.contains(&g.id));
                    prop_assert!(backed);
                }
            }
        }

        #[test]
        fn paging_is_bounded(page_sizes in prop::collection::vec(0u64..40, 9..12)) {
            let mut fetch = CatalogFetch::new(discover(), genres());
            let mut requests = 0u32;
            while let Some(page) = fetch.next_page() {
                prop_assert!(page <= MAX_CATALOG_PAGES);
                fetch.mark_requested(page);
                requests += 1;
                let size = page_sizes[(page - 1) as usize];
                fetch.absorb(&full_page(u64::from(page) * 100, size));
            }
            prop_assert!(requests <= MAX_CATALOG_PAGES);

            let reached_cap = fetch.movies.len() >= MAX_CATALOG_MOVIES;
            prop_assert!(reached_cap || requests == MAX_CATALOG_PAGES);
            prop_assert!(fetch.finish().len() <= MAX_CATALOG_MOVIES);
        }
    }
}
