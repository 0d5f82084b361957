//! Presentation adapter
//!
//! Joins the fetched album list with a tally snapshot for the album list view.
//! Input order is kept; ranking is not this module's job.

use crate::models::{AlbumRecord, AlbumWithVotes};
use crate::tally::VoteTally;

/// Attach current vote counts to each album (absent id = 0 votes)
///
/// Votes for identifiers not in `albums` are ignored.
pub fn annotate(albums: &[AlbumRecord], tally: &VoteTally) -> Vec<AlbumWithVotes> {
    albums
        .iter()
        .map(|album| {
            let votes = tally.get(&album.id).copied().unwrap_or(0);
            AlbumWithVotes::from_record(album, votes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_preserves_order_and_defaults_to_zero() {
        let albums = vec![
            AlbumRecord::new("b", "Second", "Artist B", ""),
            AlbumRecord::new("a", "First", "Artist A", "http://img/a"),
            AlbumRecord::new("c", "Third", "Artist C", ""),
        ];
        let mut tally = VoteTally::new();
        tally.insert("a".to_string(), 4);
        tally.insert("c".to_string(), 1);

        let rows = annotate(&albums, &tally);

        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(rows[0].votes, 0);
        assert_eq!(rows[1].votes, 4);
        assert_eq!(rows[1].image_url, "http://img/a");
        assert_eq!(rows[2].votes, 1);
    }

    #[test]
    fn test_annotate_ignores_votes_for_unknown_albums() {
        let albums = vec![AlbumRecord::new("a", "Only", "Artist", "")];
        let mut tally = VoteTally::new();
        tally.insert("not-in-catalog".to_string(), 12);

        let rows = annotate(&albums, &tally);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].votes, 0);
    }

    #[test]
    fn test_annotate_empty_album_list() {
        let mut tally = VoteTally::new();
        tally.insert("a".to_string(), 1);
        assert!(annotate(&[], &tally).is_empty());
    }
}
