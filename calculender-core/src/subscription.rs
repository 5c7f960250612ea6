//! Subscription links to the server's live `subscribe.ics` feed.

use tracing::debug;
use url::Url;

use crate::backend::api_url;
use crate::date_source::DateSource;
use crate::error::{CalculenderError, CalculenderResult};
use crate::request::EventRequest;

pub const SUBSCRIBE_PATH: &str = "api/subscribe.ics";

/// Google Calendar endpoint that subscribes to the URL passed as `cid`.
pub const GOOGLE_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Google Calendar page for importing a downloaded `.ics` by hand.
pub const GOOGLE_IMPORT_HELP_URL: &str = "https://calendar.google.com/calendar/r/settings/export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkScheme {
    /// The origin's own scheme, `http://` or `https://`.
    #[default]
    Origin,
    /// `webcal://`, which desktop calendar apps open as a subscription.
    Webcal,
}

/// Builds feed URLs below a fixed origin.
#[derive(Debug, Clone)]
pub struct SubscriptionLink {
    endpoint: Url,
}

impl SubscriptionLink {
    pub fn new(origin: &Url) -> CalculenderResult<Self> {
        Ok(SubscriptionLink {
            endpoint: api_url(origin, SUBSCRIBE_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Google Calendar only subscribes to `https://` feeds.
    pub fn is_https(&self) -> bool {
        self.endpoint.scheme() == "https"
    }

    /// The feed URL for `request`.
    ///
    /// Parameters are appended in a fixed order; the inactive date branch
    /// is left out entirely.
    pub fn url(&self, request: &EventRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("is_hebrew", bool_param(request.date().is_hebrew()))
                .append_pair("title", request.title())
                .append_pair("location", request.location())
                .append_pair(
                    "create_sunset_event",
                    bool_param(request.create_sunset_event()),
                )
                .append_pair("after_sunset", bool_param(request.date().after_sunset()));

            match request.date() {
                DateSource::Hebrew { day, month } => {
                    query
                        .append_pair("heb_month", &month.code().to_string())
                        .append_pair("heb_day", &day.to_string());
                }
                DateSource::Gregorian { date, .. } => {
                    // Same text as the YYYY-MM-DD parts of an ISO date.
                    query
                        .append_pair("greg_year", &date.format("%Y").to_string())
                        .append_pair("greg_month", &date.format("%m").to_string())
                        .append_pair("greg_day", &date.format("%d").to_string());
                }
            }
        }

        debug!(url = %url, "built subscription link");
        url
    }

    /// The feed URL as text in the requested scheme.
    pub fn render(&self, request: &EventRequest, scheme: LinkScheme) -> String {
        let url = self.url(request);
        match scheme {
            LinkScheme::Origin => url.to_string(),
            LinkScheme::Webcal => to_webcal(url.as_str()),
        }
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Swap a leading `http://` or `https://` for `webcal://`.
pub fn to_webcal(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    format!("webcal://{rest}")
}

/// One-click Google Calendar subscription for `subscription`.
pub fn google_import_url(subscription: &str) -> CalculenderResult<Url> {
    Url::parse_with_params(GOOGLE_RENDER_URL, &[("cid", subscription)])
        .map_err(|e| CalculenderError::Config(format!("Invalid Google Calendar URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_source::HebrewDay;
    use crate::hebrew_month::HebrewMonth;
    use chrono::NaiveDate;

    fn link() -> SubscriptionLink {
        SubscriptionLink::new(&Url::parse("https://calculender.example").unwrap()).unwrap()
    }

    fn hebrew_request(create_sunset_event: bool) -> EventRequest {
        let date = DateSource::Hebrew {
            day: HebrewDay::new(1).unwrap(),
            month: HebrewMonth::Nisan,
        };
        EventRequest::new(date, "Jerusalem", "Test", create_sunset_event).unwrap()
    }

    #[test]
    fn hebrew_link_has_exactly_the_hebrew_parameters() {
        let url = link().url(&hebrew_request(true));

        assert_eq!(url.path(), "/api/subscribe.ics");
        assert_eq!(
            url.query(),
            Some(
                "is_hebrew=true&title=Test&location=Jerusalem&create_sunset_event=true\
                 &after_sunset=false&heb_month=1&heb_day=1"
            )
        );
        assert!(url.query_pairs().all(|(k, _)| !k.starts_with("greg_")));
    }

    #[test]
    fn gregorian_link_has_exactly_the_gregorian_parameters() {
        let date = DateSource::Gregorian {
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            after_sunset: true,
        };
        let req = EventRequest::new(date, "Tel Aviv", "Mom's birthday", false).unwrap();

        let url = link().url(&req);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(
            keys,
            [
                "is_hebrew",
                "title",
                "location",
                "create_sunset_event",
                "after_sunset",
                "greg_year",
                "greg_month",
                "greg_day"
            ]
        );
        assert_eq!(pairs[0].1, "false");
        assert_eq!(pairs[1].1, "Mom's birthday");
        assert_eq!(pairs[2].1, "Tel Aviv");
        assert_eq!(pairs[3].1, "false");
        assert_eq!(pairs[4].1, "true");
        assert_eq!(pairs[5].1, "2024");
        assert_eq!(pairs[6].1, "05");
        assert_eq!(pairs[7].1, "10");
    }

    #[test]
    fn spaces_are_form_encoded() {
        let date = DateSource::Hebrew {
            day: HebrewDay::new(3).unwrap(),
            month: HebrewMonth::Av,
        };
        let req = EventRequest::new(date, "New York", "A B", true).unwrap();
        let url = link().url(&req);
        assert!(url.as_str().contains("title=A+B&location=New+York"));
    }

    #[test]
    fn origin_path_prefix_is_kept() {
        let link =
            SubscriptionLink::new(&Url::parse("https://example.com/hebcal/").unwrap()).unwrap();
        assert_eq!(
            link.endpoint().as_str(),
            "https://example.com/hebcal/api/subscribe.ics"
        );
    }

    #[test]
    fn webcal_rendering() {
        let rendered = link().render(&hebrew_request(false), LinkScheme::Webcal);
        assert!(rendered.starts_with("webcal://calculender.example/api/subscribe.ics?"));

        assert_eq!(to_webcal("http://localhost:8000/x"), "webcal://localhost:8000/x");
        assert_eq!(to_webcal("https://a.b/c"), "webcal://a.b/c");
    }

    #[test]
    fn origin_rendering_matches_url() {
        let req = hebrew_request(true);
        assert_eq!(link().render(&req, LinkScheme::Origin), link().url(&req).to_string());
    }

    #[test]
    fn google_import_wraps_link_as_cid() {
        let subscription = link().render(&hebrew_request(true), LinkScheme::Origin);
        let google = google_import_url(&subscription).unwrap();

        assert_eq!(google.host_str(), Some("calendar.google.com"));
        assert_eq!(google.path(), "/calendar/render");

        let cid: Vec<String> = google
            .query_pairs()
            .filter(|(k, _)| k == "cid")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(cid, vec![subscription]);

        // The inner query must not leak into Google's own parameters.
        assert_eq!(google.query_pairs().count(), 1);
    }

    #[test]
    fn plain_http_origin_is_not_https() {
        assert!(link().is_https());

        let local = SubscriptionLink::new(&Url::parse("http://localhost:8000").unwrap()).unwrap();
        assert!(!local.is_https());
        assert!(
            local
                .render(&hebrew_request(true), LinkScheme::Origin)
                .starts_with("http://localhost:8000/")
        );
    }
}
