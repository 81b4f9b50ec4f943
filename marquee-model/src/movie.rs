use serde::{Deserialize, Serialize};

use crate::ids::MovieId;

/// One movie record as returned by the catalog service.
///
/// Immutable once received; a sequence of these is the current result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    /// Relative poster path; resolved against the image base via [`MovieSummary::poster_url`].
    pub poster_path: Option<String>,
    pub popularity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    /// Build the absolute poster URL for the requested width, when the
    /// catalog supplied a poster path.
    pub fn poster_url(&self, image_base: &str, size: PosterSize) -> Option<String> {
        self.poster_path.as_deref().map(|path| {
            format!(
                "{}/{}{}",
                image_base.trim_end_matches('/'),
                size.as_str(),
                path
            )
        })
    }
}

/// Poster widths offered by the catalog's image host.
#[derive(Debug, Clone, Copy)]
pub enum PosterSize {
    W92,
    W154,
    W185,
    W342,
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W92 => "w92",
            PosterSize::W154 => "w154",
            PosterSize::W185 => "w185",
            PosterSize::W342 => "w342",
            PosterSize::W500 => "w500",
            PosterSize::W780 => "w780",
            PosterSize::Original => "original",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(poster_path: Option<&str>) -> MovieSummary {
        MovieSummary {
            id: MovieId(550),
            title: "Fight Club".to_string(),
            poster_path: poster_path.map(str::to_string),
            popularity: 61.4,
            release_date: Some("1999-10-15".to_string()),
            vote_average: Some(8.4),
        }
    }

    #[test]
    fn poster_url_joins_base_size_and_path() {
        let movie = summary(Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"));
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/", PosterSize::W500),
            Some("https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string())
        );
    }

    #[test]
    fn poster_url_absent_without_path() {
        assert_eq!(
            summary(None).poster_url("https://image.tmdb.org/t/p", PosterSize::Original),
            None
        );
    }
}
