//! HTML page builders shaped like the live directory markup.

/// A results page with one organic-result container per URL.
#[must_use]
pub fn search_results_page(urls: &[&str]) -> String {
    let results: String = urls
        .iter()
        .map(|url| {
            format!(
                r#"<div class="g"><div class="yuRUbf"><a href="{url}"><h3>Result</h3></a></div></div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div id="search">{results}</div></body></html>"#)
}

/// A company page with an "about" website link.
#[must_use]
pub fn professional_network_page(website: &str) -> String {
    format!(
        r#"<html><body><dl><dd><a data-tracking-control-name="about_website" href="https://www.linkedin.com/redir/redirect?url={website}">
            {website}
        </a></dd></dl></body></html>"#
    )
}

/// An employer overview page with a website link.
#[must_use]
pub fn review_site_page(website: &str) -> String {
    format!(
        r#"<html><body><ul><li><a data-test="employer-website" href="{website}">{website}</a></li></ul></body></html>"#
    )
}

/// A company profile page with a website link.
#[must_use]
pub fn investment_db_page(website: &str) -> String {
    format!(
        r#"<html><body><a class="d-block-XL font-underline" aria-label="Website link" href="{website}">{website}</a></body></html>"#
    )
}

/// An Android listing with "App support" rows given as (label, value).
#[must_use]
pub fn app_store_android_page(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="pZ8Djf"><div class="xFVDSb">{label}</div><div class="pSEeg">{value}</div></div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="support">{rows}</div></body></html>"#)
}

/// An iOS listing with external links given as (label, href).
#[must_use]
pub fn app_store_ios_page(links: &[(&str, &str)]) -> String {
    let links: String = links
        .iter()
        .map(|(label, href)| {
            format!(r#"<li><a class="link icon icon-after icon-external" href="{href}">{label}</a></li>"#)
        })
        .collect();
    format!(r#"<html><body><ul class="inline-list">{links}</ul></body></html>"#)
}
