//! Static marketing content for the site pages.

use serde::Serialize;

/// Titled blurb used for features, benefits and steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

const fn highlight(title: &'static str, description: &'static str) -> Highlight {
    Highlight { title, description }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Address,
    Phone,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactChannel {
    pub kind: ChannelKind,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const BRAND: &str = "DDoS Shield";
pub const TAGLINE: &str = "By DDoS Mitigators";
pub const HERO_TITLE: &str = "Next-Gen DDoS Protection for Modern Cloud Architectures";
pub const HERO_SUBTITLE: &str =
    "Secure your digital assets with AI-powered, cloud-integrated defense mechanisms.";
pub const COPYRIGHT: &str = "© 2024 DDoS Shield. All rights reserved.";

pub const FEATURES: [Highlight; 8] = [
    highlight("AI-based Behavioral Analysis", "Advanced AI algorithms detect and mitigate threats in real-time."),
    highlight("Lightning-Fast Response", "Instant protection against DDoS attacks, ensuring minimal downtime."),
    highlight("Global Network", "Worldwide server network for robust and reliable protection."),
    highlight("Real-time Monitoring", "Comprehensive dashboard for monitoring and analyzing traffic patterns."),
    highlight("Cloud Integration", "Seamless integration with major cloud service providers for enhanced protection."),
    highlight("Web Application Firewall", "Advanced WAF to protect against application layer attacks."),
    highlight("ML-Powered Anomaly Detection", "Machine learning algorithms to identify and flag unusual traffic patterns."),
    highlight("Instant Alerts", "Real-time notifications for potential threats and mitigation actions."),
];

pub const BENEFITS: [Highlight; 3] = [
    highlight("Unparalleled Protection", "Our AI-powered system provides the highest level of protection against modern DDoS threats."),
    highlight("Easy Integration", "Seamlessly integrate our solution with your existing infrastructure in minutes."),
    highlight("Cost-Effective", "Get enterprise-grade protection at a fraction of the cost of traditional solutions."),
];

pub const HOW_IT_WORKS: [Highlight; 6] = [
    highlight("Traffic Ingress", "Incoming traffic is routed through our global network of scrubbing centers."),
    highlight("AI Analysis", "Our ML algorithms analyze traffic patterns in real-time to detect anomalies."),
    highlight("Threat Mitigation", "Identified threats are instantly mitigated using advanced filtering techniques."),
    highlight("Cloud Integration", "Seamless integration with major cloud providers ensures comprehensive protection."),
    highlight("Real-time Monitoring", "Continuous monitoring and analysis of traffic patterns for proactive defense."),
    highlight("Instant Alerts", "Real-time notifications keep you informed of potential threats and actions taken."),
];

pub const CONTACT_CHANNELS: [ContactChannel; 3] = [
    ContactChannel { kind: ChannelKind::Address, text: "Mumbai, Maharashtra, India" },
    ContactChannel { kind: ChannelKind::Phone, text: "+91 1234 5678 90" },
    ContactChannel { kind: ChannelKind::Email, text: "info@ddosmitigators.com" },
];

pub const NAVIGATION: [NavLink; 3] = [
    NavLink { label: "Home", href: "/" },
    NavLink { label: "Dashboard", href: "/dashboard" },
    NavLink { label: "Contact", href: "/contact" },
];

/// Everything the site pages render besides the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct SiteContent {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub features: &'static [Highlight],
    pub benefits: &'static [Highlight],
    pub how_it_works: &'static [Highlight],
    pub contact_channels: &'static [ContactChannel],
    pub navigation: &'static [NavLink],
    pub copyright: &'static str,
}

pub fn site_content() -> SiteContent {
    SiteContent {
        brand: BRAND,
        tagline: TAGLINE,
        hero_title: HERO_TITLE,
        hero_subtitle: HERO_SUBTITLE,
        features: &FEATURES,
        benefits: &BENEFITS,
        how_it_works: &HOW_IT_WORKS,
        contact_channels: &CONTACT_CHANNELS,
        navigation: &NAVIGATION,
        copyright: COPYRIGHT,
    }
}
