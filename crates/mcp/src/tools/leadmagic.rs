// LeadMagic API operations exposed as MCP tools

use crate::format;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{input_schema_json, Tool, ToolRegistry};
use anyhow::Result;
use leadmagic_sdk::*;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Builds the one-line summary of a successful response.
pub type Summarizer<R> = fn(&R) -> String;

/// Adapter exposing one [`Endpoint`] as an MCP tool.
pub struct EndpointTool<E: Endpoint> {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    client: LeadMagicClient,
    summarize: Summarizer<E::Response>,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E: Endpoint> EndpointTool<E> {
    pub fn new(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        client: LeadMagicClient,
        summarize: Summarizer<E::Response>,
    ) -> Self {
        Self {
            name,
            title,
            description,
            client,
            summarize,
            _endpoint: PhantomData,
        }
    }

    async fn call(&self, arguments: Value) -> LeadMagicResult<Value> {
        let params = E::schema().validate(&arguments)?;
        let request: E = serde_json::from_value(Value::Object(params))
            .map_err(|e| LeadMagicError::validation("arguments", e.to_string()))?;
        self.client.execute_raw(&request).await
    }

    /// Summary line for a success body; generic when the body has an unexpected shape.
    fn summary(&self, body: &Value) -> String {
        match serde_json::from_value::<E::Response>(body.clone()) {
            Ok(response) => (self.summarize)(&response),
            Err(e) => {
                debug!(tool = self.name, error = %e, "Response did not match the typed view");
                format!("{} completed", self.title)
            }
        }
    }
}

#[async_trait::async_trait]
impl<E: Endpoint> Tool for EndpointTool<E> {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            title: Some(self.title.to_string()),
            description: self.description.to_string(),
            input_schema: input_schema_json(&E::schema()),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        match self.call(arguments).await {
            Ok(body) => format::success(&self.summary(&body), &body),
            Err(err) => {
                debug!(tool = self.name, kind = %err.kind(), status = err.status(), "Tool call failed");
                Ok(format::error(self.name, &err, &self.client.config().api_key))
            }
        }
    }
}

/// Register every LeadMagic operation with `registry`.
pub fn register_all(registry: &mut ToolRegistry, client: &LeadMagicClient) {
    fn add<E: Endpoint>(
        registry: &mut ToolRegistry,
        client: &LeadMagicClient,
        name: &'static str,
        title: &'static str,
        description: &'static str,
        summarize: Summarizer<E::Response>,
    ) {
        registry.register(Arc::new(EndpointTool::<E>::new(
            name,
            title,
            description,
            client.clone(),
            summarize,
        )));
    }

    add::<CreditsRequest>(
        registry,
        client,
        "check_credits",
        "Check Credit Balance",
        "Get the remaining LeadMagic credit balance of the account. Free; does not consume credits.",
        |r| format!("Credit balance: {}", r.credits),
    );
    add::<EmailValidationRequest>(
        registry,
        client,
        "validate_email",
        "Validate Email",
        "Check whether an email address is deliverable. Returns a status of valid, valid_catch_all, invalid, catch_all or unknown, plus mail server details.",
        |r| {
            if r.email.is_empty() {
                format!("Email status: {}", r.email_status)
            } else {
                format!("Email {} is {}", r.email, r.email_status)
            }
        },
    );
    add::<EmailFinderRequest>(
        registry,
        client,
        "find_email",
        "Find Email",
        "Find a person's work email from their first and last name plus the company domain or company name.",
        |r| match r.found_email() {
            Some(email) => format!("Found email {}", email),
            None => "No email found".to_string(),
        },
    );
    add::<ProfileSearchRequest>(
        registry,
        client,
        "search_profile",
        "Search Profile",
        "Get professional details (name, title, company, location) for a professional profile URL.",
        |r| match (&r.full_name, &r.professional_title) {
            (Some(name), Some(title)) => format!("Profile found: {} ({})", name, title),
            (Some(name), None) => format!("Profile found: {}", name),
            _ => "Profile lookup completed".to_string(),
        },
    );
    add::<CompanySearchRequest>(
        registry,
        client,
        "search_company",
        "Search Company",
        "Look up firmographic data for a company by domain, name or company profile URL. Any combination of identifiers is accepted.",
        |r| match &r.company_name {
            Some(name) => format!("Company found: {}", name),
            None => "Company lookup completed".to_string(),
        },
    );
    add::<MobileFinderRequest>(
        registry,
        client,
        "find_mobile",
        "Find Mobile Number",
        "Find a mobile phone number from a profile URL, a work email or a personal email.",
        |r| match &r.mobile_number {
            Some(number) => format!("Found mobile number {}", number),
            None => "No mobile number found".to_string(),
        },
    );
    add::<EmailToProfileRequest>(
        registry,
        client,
        "email_to_profile",
        "Email to Profile",
        "Find the professional profile behind a work email address (reverse lookup).",
        |r| match &r.profile_url {
            Some(url) => format!("Found profile {}", url),
            None => "No profile found".to_string(),
        },
    );
    add::<JobsSearchRequest>(
        registry,
        client,
        "search_jobs",
        "Search Jobs",
        "Search job postings by company, title, location, country, job type and experience level. Paginated with page (default 1) and per_page (default 20, max 50).",
        |r| {
            format!(
                "Found {} job(s) on page {} of {} ({} total)",
                r.jobs.len(),
                r.page,
                r.total_pages,
                r.total_count
            )
        },
    );
    add::<RoleFinderRequest>(
        registry,
        client,
        "find_role",
        "Find Role",
        "Find the person holding a job title at a company, identified by name, domain or company profile URL.",
        |r| match (&r.name, &r.job_title) {
            (Some(name), Some(title)) => format!("Found {} as {}", name, title),
            (Some(name), None) => format!("Found {}", name),
            _ => "No matching person found".to_string(),
        },
    );
    add::<EmployeeFinderRequest>(
        registry,
        client,
        "find_employees",
        "Find Employees",
        "List employees of a company by company name. Paginated with page (default 1) and per_page (default 20, max 50).",
        |r| match r.total_count {
            Some(total) => format!("Found {} employee(s) ({} total)", r.employees.len(), total),
            None => format!("Found {} employee(s)", r.employees.len()),
        },
    );
    add::<CompanyFundingRequest>(
        registry,
        client,
        "get_company_funding",
        "Company Funding",
        "Get funding rounds, financials and competitors of a company by domain, name or company profile URL.",
        |r| {
            let name = r.company_name.as_deref().unwrap_or("company");
            let competitors = r.competitors.as_ref().map_or(0, Vec::len);
            format!("Funding data for {} ({} competitor(s))", name, competitors)
        },
    );
    add::<PersonalEmailRequest>(
        registry,
        client,
        "find_personal_email",
        "Find Personal Email",
        "Find personal email addresses for a professional profile URL.",
        |r| format!("Found {} personal email(s)", r.personal_emails.len()),
    );
    add::<WorkEmailRequest>(
        registry,
        client,
        "find_work_email",
        "Find Work Email",
        "Find the work email address for a professional profile URL.",
        |r| match &r.work_email {
            Some(email) => format!("Found work email {}", email),
            None => "No work email found".to_string(),
        },
    );
    add::<GoogleAdsRequest>(
        registry,
        client,
        "search_google_ads",
        "Search Google Ads",
        "Find paid-search ads run by a company, by domain or company name.",
        |r| format!("Found {} Google ad(s)", r.ads.len()),
    );
    add::<MetaAdsRequest>(
        registry,
        client,
        "search_meta_ads",
        "Search Meta Ads",
        "Find paid-social ads run by a company, by domain or company name.",
        |r| format!("Found {} Meta ad(s)", r.ads.len()),
    );
    add::<B2bAdsRequest>(
        registry,
        client,
        "search_b2b_ads",
        "Search B2B Ads",
        "Find B2B ad campaigns run by a company, by domain or company name.",
        |r| format!("Found {} B2B ad(s)", r.ads.len()),
    );
    add::<B2bAdDetailsRequest>(
        registry,
        client,
        "get_b2b_ad_details",
        "B2B Ad Details",
        "Get the full details of a B2B ad by its ad_id (from search_b2b_ads).",
        |r| match (&r.ad_id, &r.headline) {
            (Some(id), Some(headline)) => format!("Ad {}: {}", id, headline),
            (Some(id), None) => format!("Ad {}", id),
            _ => "Ad details retrieved".to_string(),
        },
    );
    add::<JobCountriesRequest>(
        registry,
        client,
        "get_job_countries",
        "Job Countries",
        "List the countries supported by search_jobs, with their country_id values.",
        |r| format!("{} supported countries", r.countries.len()),
    );
    add::<JobTypesRequest>(
        registry,
        client,
        "get_job_types",
        "Job Types",
        "List the job types supported by search_jobs, with their job_type_id values.",
        |r| format!("{} supported job types", r.job_types.len()),
    );
}
