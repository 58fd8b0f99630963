//! GraphQL query text sent to the AniList API.

pub const POPULAR_QUERY: &str = "\
query ($media: MediaType) {
  Page(page: 1, perPage: 50) {
    media(type: $media, sort: POPULARITY_DESC) {
      id
      title { romaji english native }
      format
      status
      genres
      averageScore
      siteUrl
      description
    }
  }
}";

pub const SEARCH_QUERY: &str = "\
query ($search: String, $media: MediaType, $perPage: Int) {
  Page(page: 1, perPage: $perPage) {
    media(search: $search, type: $media) {
      id
      title { romaji english native }
      format
      status
      genres
      averageScore
      siteUrl
      description
    }
  }
}";

pub const MEDIA_QUERY: &str = "\
query ($id: Int, $media: MediaType) {
  Media(id: $id, type: $media) {
    id
    title { romaji english native }
    format
    status
    genres
    averageScore
    siteUrl
    description
  }
}";
