use regex::Regex;
use std::sync::LazyLock;

/// Container formats the pipeline ingests.
pub static MEDIA_EXTENSIONS: &[&str] = &["avi", "mp4", "mkv"];

/// Parsed movie info from a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieInfo {
    pub title: String,
    pub year: Option<u16>,
}

/// Parsed episode info from a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub show_title: String,
    pub season: u32,
    pub episode: u32,
}

/// Result of classifying a media filename. Episode patterns win over movie
/// patterns; anything unparseable falls back to a title-only movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMedia {
    Movie(MovieInfo),
    Episode(EpisodeInfo),
}

// SxxExx pattern: S01E02, s1e3, etc.
static RE_SXXEXX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[Ss](\d{1,2})[Ee](\d{1,3})").unwrap());

// 1x02 pattern
static RE_XEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2})[xX](\d{2,3})").unwrap());

// "Season X Episode Y" pattern
static RE_SEASON_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Season\s+(\d+)\s+Episode\s+(\d+)").unwrap());

// Movie: "Title (Year)" or "Title.Year"
static RE_MOVIE_YEAR_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\((\d{4})\)").unwrap());

static RE_MOVIE_YEAR_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)[\.\s](\d{4})(?:[\.\s]|$)").unwrap());

/// Check if a file has a recognized media extension.
pub fn is_media_file(filename: &str) -> bool {
    match filename.rsplit('.').next() {
        Some(ext) => MEDIA_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Clean up a title: replace dots/underscores with spaces, trim.
fn clean_title(raw: &str) -> String {
    raw.replace('.', " ").replace('_', " ").trim().to_string()
}

/// Classify a media filename as episode or movie.
///
/// Episode patterns are tried first; a name with no season/episode tokens is
/// treated as a movie, falling back to a title-only movie when no year is
/// found either.
pub fn parse_filename(filename: &str) -> ParsedMedia {
    let stem = filename
        .rsplit('/')
        .next()
        .unwrap_or(filename)
        .rsplit('\\')
        .next()
        .unwrap_or(filename);

    // Strip extension
    let stem = match stem.rfind('.') {
        Some(pos) => &stem[..pos],
        None => stem,
    };

    if let Some(ep) = try_parse_episode(stem) {
        return ParsedMedia::Episode(ep);
    }

    if let Some(movie) = try_parse_movie(stem) {
        return ParsedMedia::Movie(movie);
    }

    ParsedMedia::Movie(MovieInfo {
        title: clean_title(stem),
        year: None,
    })
}

fn try_parse_episode(stem: &str) -> Option<EpisodeInfo> {
    for re in [&*RE_SXXEXX, &*RE_XEP, &*RE_SEASON_EPISODE] {
        if let Some(caps) = re.captures(stem) {
            let season: u32 = caps[1].parse().ok()?;
            let episode: u32 = caps[2].parse().ok()?;
            let match_start = caps.get(0)?.start();
            let show_title = clean_title(&stem[..match_start]);
            return Some(EpisodeInfo {
                show_title,
                season,
                episode,
            });
        }
    }
    None
}

fn try_parse_movie(stem: &str) -> Option<MovieInfo> {
    // "Title (2024)"
    if let Some(caps) = RE_MOVIE_YEAR_PAREN.captures(stem) {
        let title = clean_title(&caps[1]);
        let year: u16 = caps[2].parse().ok()?;
        return Some(MovieInfo {
            title,
            year: Some(year),
        });
    }

    // "Title.2024.etc"
    if let Some(caps) = RE_MOVIE_YEAR_DOT.captures(stem) {
        let title = clean_title(&caps[1]);
        let year: u16 = caps[2].parse().ok()?;
        if year >= 1900 && year <= 2100 {
            return Some(MovieInfo {
                title,
                year: Some(year),
            });
        }
    }

    None
}
