use jutsu_catalog::{parse_catalog, parse_catalog_bytes, Error};

fn full_page() -> &'static str {
    r#"<html>
      <head><meta charset="utf-8"></head>
      <body>
        <h1 class="header_video">Смотреть Наруто: ураганные хроники все серии и сезоны</h1>
        <div class="all_anime_title" style="background: url('/uploads/naruto.jpg') no-repeat"></div>
        <span class="age_rating_all">16+</span>
        <div class="under_video_additional">
          Жанры: <a href="/anime/adventure/">Аниме Приключения</a> <a href="/anime/shounen/">Сёнэн</a><br>
          Темы: <a href="/anime/ninja/">Ниндзя</a><br>
          Годы выпуска: <a href="/anime/2007/">2007</a> <a href="/anime/2009/">2009</a><br>
          Оригинальное название: <b>Naruto Shippuuden</b>
        </div>
        <p class="under_video"><span><i>смотреть аниме онлайн</i>История о <b>ниндзя</b> из деревни Коноха</span></p>
        <span itemprop="ratingValue">9.2</span>
        <span itemprop="bestRating">10</span>
        <meta itemprop="worstRating" content="1">
        <span itemprop="ratingCount">1523</span>
        <a href="/anime/ongoing/">онгоинги</a>
        <div class="watch_l">
          <h2 class="the-anime-season need_bold_season">1 сезон</h2>
          <a href="/naruto/season-1/episode-1.html"><i class="sp"></i>1 серия</a>
          <a href="/naruto/season-1/episode-2.html"><i class="sp"></i>2 серия</a>
          <a href="/naruto/season-1/episode-3.html"><i class="sp"></i>3 серия</a>
          <a href="/naruto/season-1/episode-4.html"><i class="sp"></i>4 серия</a>
          <h2 class="the-anime-season need_bold_season">2 сезон</h2>
          <a href="/naruto/season-2/episode-1.html"><i class="sp"></i>1 серия</a>
          <a href="/naruto/season-2/episode-2.html"><i class="sp"></i>2 серия</a>
        </div>
      </body>
    </html>"#
}

#[test]
fn two_seasons_split_four_two() {
    let anime = match parse_catalog(full_page(), "https://jut.su/naruto/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(anime.seasons.len(), 2);
    assert_eq!(anime.seasons[0].number, 1);
    assert_eq!(anime.seasons[0].episodes.len(), 4);
    assert_eq!(anime.seasons[1].number, 2);
    assert_eq!(anime.seasons[1].episodes.len(), 2);
    assert_eq!(anime.episodes.len(), 6);

    // Flat list sorted by (season, episode number)
    let keys: Vec<(u32, u32)> = anime
        .episodes
        .iter()
        .map(|e| (e.season_number.unwrap_or(0), e.number))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn season_containment_invariants() {
    let anime = match parse_catalog(full_page(), "https://jut.su/naruto/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    for season in &anime.seasons {
        for episode in &season.episodes {
            assert_eq!(episode.season_number, Some(season.number));
            assert!(anime.episodes.contains(episode));
        }
    }
}

#[test]
fn metadata_fields_extracted() {
    let anime = match parse_catalog(full_page(), "https://jut.su/naruto/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(anime.title, "Наруто: ураганные хроники");
    assert_eq!(anime.original_title.as_deref(), Some("Naruto Shippuuden"));
    assert_eq!(anime.poster_url.as_deref(), Some("/uploads/naruto.jpg"));
    assert_eq!(anime.genres, vec!["Приключения", "Сёнэн"]);
    assert_eq!(anime.themes, vec!["Ниндзя"]);
    assert_eq!(anime.years, vec![2007, 2009]);
    assert_eq!(anime.year, Some(2007));
    assert_eq!(anime.age_rating.as_deref(), Some("16+"));
    assert_eq!(anime.status.as_deref(), Some("онгоинг"));
    assert_eq!(
        anime.description.as_deref(),
        Some("История о ниндзя из деревни Коноха")
    );

    let rating = match anime.rating {
        Some(ref rating) => rating,
        None => panic!("expected rating"),
    };
    assert!((rating.value - 9.2).abs() < f64::EPSILON);
    assert_eq!(rating.count, 1523);
}

#[test]
fn episode_urls_absolutized_against_page_origin() {
    let anime = match parse_catalog(full_page(), "https://jut.su/naruto/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(
        anime.episodes[0].url,
        "https://jut.su/naruto/season-1/episode-1.html"
    );
    assert_eq!(anime.episodes[0].title, "1 серия");
}

#[test]
fn parse_is_idempotent() {
    let first = parse_catalog(full_page(), "https://jut.su/naruto/");
    let second = parse_catalog(full_page(), "https://jut.su/naruto/");

    match (first, second) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        other => panic!("expected two Ok results, got {other:?}"),
    }
}

#[test]
fn to_value_mirrors_tree_with_counts() {
    let anime = match parse_catalog(full_page(), "https://jut.su/naruto/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let value = anime.to_value();
    assert_eq!(value["title"], "Наруто: ураганные хроники");
    assert_eq!(value["seasons"][0]["episodes_count"], 4);
    assert_eq!(value["seasons"][1]["episodes_count"], 2);
    assert_eq!(value["episodes"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["rating"]["count"], 1523);
}

#[test]
fn page_without_title_heading_is_malformed() {
    let html = r#"<html><body><div class="watch_l"></div></body></html>"#;
    match parse_catalog(html, "https://jut.su/x/") {
        Err(Error::Malformed(_)) => {}
        other => panic!("expected Err(Malformed), got {other:?}"),
    }
}

#[test]
fn page_without_watch_container_degrades_to_flat_list() {
    let html = r#"<html><body>
      <h1 class="header_video">Смотреть Тестовое аниме все серии</h1>
      <a href="/test/episode-2.html"><i></i>2 серия</a>
      <a href="/test/episode-1.html"><i></i>1 серия</a>
    </body></html>"#;

    let anime = match parse_catalog(html, "https://jut.su/test/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(anime.seasons.is_empty());
    assert_eq!(
        anime.episodes.iter().map(|e| e.number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(anime.episodes.iter().all(|e| e.season_number.is_none()));
}

#[test]
fn bytes_input_decodes_windows1251_by_default() {
    let html = "<html><body>\
        <h1 class=\"header_video\">Смотреть Наруто все серии</h1>\
        <div class=\"watch_l\"><a href=\"/naruto/episode-1.html\"><i></i>1 серия</a></div>\
        </body></html>";
    let (encoded, _, _) = encoding_rs::WINDOWS_1251.encode(html);

    let anime = match parse_catalog_bytes(&encoded, "https://jut.su/naruto/") {
        Ok(anime) => anime,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(anime.title, "Наруто");
    assert_eq!(anime.episodes[0].title, "1 серия");
}
