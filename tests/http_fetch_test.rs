// Tests for HttpFetcher and the HTTP-backed report path
// Uses mockito for HTTP mocking

use chrono::TimeZone;
use chrono_tz::America::Los_Angeles;
use mockito::{Matcher, Server};
use std::time::Duration;
use surf_report::config::Config;
use surf_report::fetch::{Fetch, HttpFetcher};
use surf_report::orchestrator::get_spot_data;
use surf_report::{ErrorKind, SurfError};

const WEATHER: &str = "\
#YY  MM DD hh mm WDIR WSPD GST  WVHT   DPD   APD MWD   PRES  ATMP  WTMP  DEWP  VIS PTDY  TIDE
#yr  mo dy hr mn degT m/s  m/s     m   sec   sec degT   hPa  degC  degC  degC  nmi  hPa    ft
2022 09 04 19 00 175  3.5  4.5   1.9    MM   5.0  MM 1013.5  24.9  26.5    MM   MM   MM    MM
2022 09 04 18 00 183  3.6  4.9    MM    MM    MM  MM 1013.6  25.3  26.5    MM   MM   MM    MM
";

const WAVES: &str = "\
#YY  MM DD hh mm WVHT  SwH  SwP  WWH  WWP SwD WWD  STEEPNESS  APD MWD
#yr  mo dy hr mn    m    m  sec    m  sec  -  degT     -      sec degT
2022 09 04 18 40  2.1  1.5  9.1  1.4  7.1 WNW  NW    AVERAGE  6.1 292
";

const TIDES: &str = r#"{ "predictions" : [
    {"t":"2022-09-04 18:00", "v":"3.500"},
    {"t":"2022-09-04 19:00", "v":"2.000"},
    {"t":"2022-09-04 20:00", "v":"1.700"}
]}"#;

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_text_success_with_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/datagetter")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("station".into(), "9414290".into()),
            Matcher::UrlEncoded("format".into(), "json".into()),
        ]))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let url = format!("{}/datagetter", server.url());
    let body = fetcher()
        .get_text(&url, &[("station", "9414290".to_string()), ("format", "json".to_string())])
        .await
        .unwrap();
    assert_eq!(body, "ok");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_text_404() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/99999.txt")
        .with_status(404)
        .create_async()
        .await;

    let url = format!("{}/99999.txt", server.url());
    let err = fetcher().get_text(&url, &[]).await.unwrap_err();
    match &err {
        SurfError::Status { url, status } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/99999.txt"));
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Transport);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_text_connection_refused() {
    // Nothing listens on port 9 of localhost in the test environment
    let err = fetcher()
        .get_text("http://127.0.0.1:9/46012.txt", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SurfError::Http { .. }), "{err}");
}

#[tokio::test]
async fn test_get_spot_data_over_http() {
    let mut server = Server::new_async().await;

    let weather = server
        .mock("GET", "/realtime2/46237.txt")
        .with_status(200)
        .with_body(WEATHER)
        .create_async()
        .await;
    let waves = server
        .mock("GET", "/realtime2/46237.spec")
        .with_status(200)
        .with_body(WAVES)
        .create_async()
        .await;
    let tides = server
        .mock("GET", "/datagetter")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("station".into(), "9414290".into()),
            Matcher::UrlEncoded("product".into(), "predictions".into()),
            Matcher::UrlEncoded("time_zone".into(), "gmt".into()),
            Matcher::UrlEncoded("begin_date".into(), "20220903".into()),
            Matcher::UrlEncoded("end_date".into(), "20220905".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TIDES)
        .create_async()
        .await;

    let mut config = Config::default();
    config.sources.ndbc_base_url = format!("{}/realtime2/", server.url());
    config.sources.noaa_url = format!("{}/datagetter", server.url());

    // 12:00 PDT == 19:00 UTC
    let target = Los_Angeles.with_ymd_and_hms(2022, 9, 4, 12, 0, 0).unwrap();
    let (conditions, tide) = get_spot_data(&config, "Ocean Beach", Some(target)).await.unwrap();

    assert_eq!(conditions.station_id, "46237");
    assert_eq!(conditions.wind_speed.as_ref().unwrap().to_string(), "3.5 meters per second");
    // Both tables report APD and WVHT; the wave table wins
    assert_eq!(conditions.average_wave_period.as_ref().unwrap().value, "6.1");
    assert_eq!(conditions.significant_wave_height.as_ref().unwrap().value, "2.1");
    assert!((tide.height - 2.0).abs() < 1e-9);
    assert!((tide.rate_of_change + 0.3).abs() < 1e-9);

    weather.assert_async().await;
    waves.assert_async().await;
    tides.assert_async().await;
}

#[tokio::test]
async fn test_get_spot_data_upstream_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", Matcher::Regex(r"^/realtime2/.*".to_string()))
        .with_status(200)
        .with_body(WEATHER)
        .create_async()
        .await;
    server
        .mock("GET", "/datagetter")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": {"message": "No Predictions data was found."}}"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.sources.ndbc_base_url = format!("{}/realtime2/", server.url());
    config.sources.noaa_url = format!("{}/datagetter", server.url());

    let target = Los_Angeles.with_ymd_and_hms(2022, 9, 4, 12, 0, 0).unwrap();
    let err = get_spot_data(&config, "Ocean Beach", Some(target)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
