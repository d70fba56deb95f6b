//! Stateless request builder and response parser for the Oura v2 API.
//!
//! # Design
//! `OuraClient` holds only its `ClientConfig`. Each resource has a `build_*`
//! method that produces an `HttpRequest`, a `parse_*` method that consumes an
//! `HttpResponse`, and a `get_*` method that runs both around a caller
//! supplied `HttpGetter`. Parsing always classifies the envelope before
//! decoding, so an error body served with HTTP 200 surfaces as
//! `OuraError::Api` instead of a decode failure. List operations return a
//! single `Page`; following `next_token` is left to the caller.

use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::decode::{decode_object, decode_page, Record, PAGE_REQUIRED_KEYS};
use crate::envelope::classify;
use crate::error::Result;
use crate::http::{HttpGetter, HttpRequest, HttpResponse};
use crate::types::{
    DailyActivityRecord, DateRange, Page, PersonalInfoRecord, SleepSessionRecord,
    SleepTimeRecord,
};

pub const DAILY_ACTIVITY_PATH: &str = "/usercollection/daily_activity";
pub const PERSONAL_INFO_PATH: &str = "/usercollection/personal_info";
pub const SLEEP_TIME_PATH: &str = "/usercollection/sleep_time";
pub const SLEEP_PATH: &str = "/usercollection/sleep";

/// Synchronous, stateless client for the Oura v2 API.
#[derive(Debug, Clone)]
pub struct OuraClient {
    config: ClientConfig,
}

impl OuraClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -- daily activity ----------------------------------------------------

    pub fn build_daily_activity(&self, id: &str) -> HttpRequest {
        self.build_document(DAILY_ACTIVITY_PATH, id)
    }

    pub fn build_daily_activities(&self, range: &DateRange) -> HttpRequest {
        self.build(DAILY_ACTIVITY_PATH.to_string(), range.query_pairs())
    }

    pub fn parse_daily_activity(&self, response: HttpResponse) -> Result<DailyActivityRecord> {
        parse_record(&response)
    }

    pub fn parse_daily_activities(&self, response: HttpResponse) -> Result<Page<DailyActivityRecord>> {
        parse_list(&response)
    }

    pub fn get_daily_activity<G: HttpGetter>(&self, getter: &G, id: &str) -> Result<DailyActivityRecord> {
        let response = send(getter, &self.build_daily_activity(id))?;
        self.parse_daily_activity(response)
    }

    pub fn get_daily_activities<G: HttpGetter>(
        &self,
        getter: &G,
        range: &DateRange,
    ) -> Result<Page<DailyActivityRecord>> {
        let response = send(getter, &self.build_daily_activities(range))?;
        self.parse_daily_activities(response)
    }

    // -- personal info -----------------------------------------------------

    pub fn build_personal_info(&self) -> HttpRequest {
        self.build(PERSONAL_INFO_PATH.to_string(), Vec::new())
    }

    pub fn parse_personal_info(&self, response: HttpResponse) -> Result<PersonalInfoRecord> {
        parse_record(&response)
    }

    pub fn get_personal_info<G: HttpGetter>(&self, getter: &G) -> Result<PersonalInfoRecord> {
        let response = send(getter, &self.build_personal_info())?;
        self.parse_personal_info(response)
    }

    // -- sleep time --------------------------------------------------------

    pub fn build_sleep_time(&self, id: &str) -> HttpRequest {
        self.build_document(SLEEP_TIME_PATH, id)
    }

    pub fn build_sleep_times(&self, range: &DateRange) -> HttpRequest {
        self.build(SLEEP_TIME_PATH.to_string(), range.query_pairs())
    }

    pub fn parse_sleep_time(&self, response: HttpResponse) -> Result<SleepTimeRecord> {
        parse_record(&response)
    }

    pub fn parse_sleep_times(&self, response: HttpResponse) -> Result<Page<SleepTimeRecord>> {
        parse_list(&response)
    }

    pub fn get_sleep_time<G: HttpGetter>(&self, getter: &G, id: &str) -> Result<SleepTimeRecord> {
        let response = send(getter, &self.build_sleep_time(id))?;
        self.parse_sleep_time(response)
    }

    pub fn get_sleep_times<G: HttpGetter>(&self, getter: &G, range: &DateRange) -> Result<Page<SleepTimeRecord>> {
        let response = send(getter, &self.build_sleep_times(range))?;
        self.parse_sleep_times(response)
    }

    // -- sleep -------------------------------------------------------------

    pub fn build_sleep(&self, id: &str) -> HttpRequest {
        self.build_document(SLEEP_PATH, id)
    }

    pub fn build_sleeps(&self, range: &DateRange) -> HttpRequest {
        self.build(SLEEP_PATH.to_string(), range.query_pairs())
    }

    pub fn parse_sleep(&self, response: HttpResponse) -> Result<SleepSessionRecord> {
        parse_record(&response)
    }

    pub fn parse_sleeps(&self, response: HttpResponse) -> Result<Page<SleepSessionRecord>> {
        parse_list(&response)
    }

    pub fn get_sleep<G: HttpGetter>(&self, getter: &G, id: &str) -> Result<SleepSessionRecord> {
        let response = send(getter, &self.build_sleep(id))?;
        self.parse_sleep(response)
    }

    pub fn get_sleeps<G: HttpGetter>(&self, getter: &G, range: &DateRange) -> Result<Page<SleepSessionRecord>> {
        let response = send(getter, &self.build_sleeps(range))?;
        self.parse_sleeps(response)
    }

    // -- helpers -----------------------------------------------------------

    fn build_document(&self, collection: &str, id: &str) -> HttpRequest {
        self.build(format!("{collection}/{id}"), Vec::new())
    }

    fn build(&self, path: String, query: Vec<(String, String)>) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.config.access_token() {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            path: format!("{}{path}", self.config.base_url()),
            query,
            headers,
        }
    }
}

fn send<G: HttpGetter>(getter: &G, request: &HttpRequest) -> Result<HttpResponse> {
    debug!(path = %request.path, query = ?request.query, "GET");
    let response = getter.get(request)?;
    debug!(path = %request.path, status = response.status, "response received");
    Ok(response)
}

fn parse_record<T: Record>(response: &HttpResponse) -> Result<T> {
    trace!(kind = T::KIND, status = response.status, "classifying response");
    let object = classify(response, T::REQUIRED_KEYS)?;
    decode_object(&object)
}

fn parse_list<T: Record>(response: &HttpResponse) -> Result<Page<T>> {
    trace!(kind = T::KIND, status = response.status, "classifying page");
    let object = classify(response, PAGE_REQUIRED_KEYS)?;
    let page = decode_page(&object)?;
    trace!(kind = T::KIND, records = page.data.len(), more = page.next_token.is_some(), "page decoded");
    Ok(page)
}
