//! Static devotional catalog: albums and the songs inside them.
//!
//! The catalog is built once at startup and never mutated. Songs carry the
//! devotional metadata (meaning, scripture verse) shown in the player bar.

/// Where a song's audio comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceRef {
    /// A bundled asset on the local filesystem.
    Bundled(String),
    /// A remote URL fetched before decoding.
    Remote(String),
}

/// A playable track with its devotional metadata.
#[derive(Clone, Debug)]
pub struct Song {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub source: SourceRef,
    pub image: String,
    pub meaning: String,
    pub verse: String,
}

/// A named collection of songs with a cover image.
#[derive(Clone, Debug)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub cover: String,
    pub songs: Vec<Song>,
}

/// The full album list, fixed for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub albums: Vec<Album>,
}

impl Catalog {
    /// The built-in Hebron fixture.
    pub fn builtin() -> Self {
        Self {
            albums: vec![
                Album {
                    id: "telugu001".to_string(),
                    title: "Songs of Zion - Telugu".to_string(),
                    cover: "https://i.imgur.com/8fKQ6iK.jpg".to_string(),
                    songs: vec![
                        Song {
                            id: 1,
                            title: "Mahima Nireekshana".to_string(),
                            artist: "Hebron Telugu Worship".to_string(),
                            source: SourceRef::Bundled("assets/Mahima_Nireekshana.mp3".to_string()),
                            image: "https://i.imgur.com/8fKQ6iK.jpg".to_string(),
                            meaning: "This song expresses longing and anticipation for the glory of God in trying times.".to_string(),
                            verse: "Isaiah 60:1 - \"Arise, shine, for your light has come, and the glory of the Lord rises upon you.\"".to_string(),
                        },
                        Song {
                            id: 2,
                            title: "Adbuta Deevenalu".to_string(),
                            artist: "Hebron Telugu Choir".to_string(),
                            source: SourceRef::Bundled("assets/Adbuta_Deevenalu.mp3".to_string()),
                            image: "https://i.imgur.com/Xw1i5qO.jpeg".to_string(),
                            meaning: "A joyful declaration of the miraculous blessings God bestows on His people.".to_string(),
                            verse: "Ephesians 1:3 - \"Praise be to the God... who has blessed us in the heavenly realms with every spiritual blessing in Christ.\"".to_string(),
                        },
                    ],
                },
                Album {
                    id: "english001".to_string(),
                    title: "Worship Collection - English".to_string(),
                    cover: "https://i.imgur.com/4oRYi8z.jpg".to_string(),
                    songs: vec![
                        Song {
                            id: 3,
                            title: "Great Are You Lord".to_string(),
                            artist: "Hebron Worship Band".to_string(),
                            source: SourceRef::Remote(
                                "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-6.mp3".to_string(),
                            ),
                            image: "https://i.imgur.com/R8QHHzd.jpg".to_string(),
                            meaning: "A declaration of God's greatness and breath-giving power over all creation.".to_string(),
                            verse: "Psalm 145:3 - \"Great is the Lord and most worthy of praise; His greatness no one can fathom.\"".to_string(),
                        },
                    ],
                },
            ],
        }
    }

    pub fn album(&self, index: usize) -> Option<&Album> {
        self.albums.get(index)
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn song_by_id(&self, id: u32) -> Option<&Song> {
        self.albums
            .iter()
            .flat_map(|album| album.songs.iter())
            .find(|song| song.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_song_ids() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<u32> = catalog
            .albums
            .iter()
            .flat_map(|a| a.songs.iter().map(|s| s.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn builtin_catalog_albums_are_nonempty() {
        let catalog = Catalog::builtin();
        assert!(catalog.album_count() > 0);
        for album in &catalog.albums {
            assert!(!album.songs.is_empty(), "album {} has no songs", album.id);
        }
    }

    #[test]
    fn song_lookup_finds_every_catalog_song() {
        let catalog = Catalog::builtin();
        for album in &catalog.albums {
            for song in &album.songs {
                assert!(catalog.song_by_id(song.id).is_some());
            }
        }
    }
}
