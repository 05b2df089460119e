pub mod episodes;
pub mod movies;
pub mod shows;
pub mod videos;
