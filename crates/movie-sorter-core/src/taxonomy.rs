//! Fixed genre buckets and the reserved folder names that live next to them.

/// Fallback bucket for movies that could not be classified.
pub const MANUAL_CHECKING: &str = "Manual Checking";

/// Staging bucket holding the saved metadata of every looked-up movie.
pub const MOVIES_INFO: &str = "movies info";

/// Summary file written at the root once the run is over.
pub const SUMMARY_FILE: &str = "process_summary.txt";

/// Genre buckets, in creation order.
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "Game-Show",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "News",
    "Reality-TV",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Talk-Show",
    "Thriller",
    "War",
    "Western",
    "Action-Comedy",
    "Action-Horror",
    "Action-Adventure",
    "Adventure-Comedy",
    "Adventure-Fantasy",
    "Animation-Action",
    "Animation-Comedy",
    "Animation-Drama",
    "Animation-Family",
    "Biography-Drama",
    "Biography-History",
    "Comedy-Drama",
    "Comedy-Romance",
    "Crime-Drama",
    "Crime-Thriller",
    "Documentary-Biography",
    "Documentary-Drama",
    "Documentary-Music",
    "Drama-Family",
    "Drama-Mystery",
    "Drama-Romance",
    "Fantasy-Adventure",
    "Fantasy-Action",
    "Fantasy-Drama",
    "Fantasy-Romance",
    "Film-Noir-Crime",
    "Film-Noir-Drama",
    "Game-Show-Music",
    "History-Drama",
    "History-Romance",
    "Horror-Comedy",
    "Horror-Mystery",
    "Horror-Thriller",
    "Music-Drama",
    "Music-Romance",
    "Musical-Comedy",
    "Musical-Drama",
    "Mystery-Drama",
    "Mystery-Romance",
    "News-Talk-Show",
    "Reality-TV-Game-Show",
    "Romance-Comedy",
    "Romance-Drama",
    "Sci-Fi-Action",
    "Sci-Fi-Adventure",
    "Sci-Fi-Drama",
    "Sci-Fi-Thriller",
    "Sport-Drama",
    "Sport-Documentary",
    "Talk-Show-Comedy",
    "Talk-Show-Drama",
    "Thriller-Action",
    "Thriller-Crime",
    "Thriller-Drama",
    "War-Drama",
    "War-History",
    "Western-Action",
    "Western-Drama",
    "Western-Romance",
    "Anime",
    "Biopic",
    "Docudrama",
    "Experimental",
    "Historical",
    "Neo-Noir",
    "Superhero",
    "Survival",
    "Urban",
    "Zombie",
];

pub fn is_genre(name: &str) -> bool {
    GENRES.contains(&name)
}

/// Reserved buckets are managed by the organizer itself and never treated as movies.
pub fn is_reserved(name: &str) -> bool {
    name == MANUAL_CHECKING || name == MOVIES_INFO
}

/// True for any folder name the organizer owns: genre buckets and reserved buckets.
pub fn is_bucket(name: &str) -> bool {
    is_genre(name) || is_reserved(name)
}
