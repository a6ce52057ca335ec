//! Built-in knowledge table.
//!
//! Declaration order is significant: the matcher returns the first entry
//! with a matching pattern, so more specific topics come before broader ones.

use neko_types::knowledge::KnowledgeEntry;

/// Answer returned when nothing in the table matches.
pub const DEFAULT_RESPONSE: &str = "I'm not sure what you're after yet. Try naming a specific \
target or tool, for example \"lookup an IP\", \"check DNS for a domain\", or \"search a username\". \
Type \"what can you do\" for the full list.";

/// The built-in OSINT assistant table, in match order.
pub fn builtin_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "capabilities",
            &["what can you do", "capabilities", "help"],
            "I can walk you through the dashboard's OSINT tools: IP geolocation, DNS \
             resolution, WHOIS registration data, breach checks for email addresses, \
             username searches across social platforms, phone number prefixes, and pointers \
             to the OSINT Framework and Nmap documentation. Switch to a remote provider for \
             free-form questions.",
            98,
        ),
        KnowledgeEntry::new(
            "greeting",
            &["hello", "hey there", "good morning", "good evening"],
            "Hi! Ask me about any of the lookup tools, or type \"what can you do\".",
            95,
        ),
        KnowledgeEntry::new(
            "ip_lookup",
            &["ip address", "geolocat", "ip lookup", "lookup an ip"],
            "Open the IP panel and enter an IPv4 or IPv6 address. The lookup returns the \
             owning network, ASN, city and country. Results for mobile and VPN ranges are \
             approximate.",
            92,
        ),
        KnowledgeEntry::new(
            "dns",
            &["dns", "a record", "resolve", "nameserver"],
            "The DNS panel queries public resolvers for A records. For MX or TXT records use \
             the MXToolbox link in the tool grid.",
            90,
        ),
        KnowledgeEntry::new(
            "whois",
            &["whois", "registrar", "domain owner", "registration"],
            "WHOIS shows the registrar, creation and expiry dates, and name servers of a \
             domain. Many registrants use privacy proxies, so contact fields are often redacted.",
            90,
        ),
        KnowledgeEntry::new(
            "breach",
            &["breach", "pwned", "leak", "compromised"],
            "The breach panel checks an email address against known data breaches. A clean \
             result only means the address is absent from indexed breaches.",
            88,
        ),
        KnowledgeEntry::new(
            "username",
            &["username", "social media", "profile", "handle"],
            "The username tool opens the handle on eleven platforms at once, including GitHub, \
             Reddit, Instagram and TikTok. A page that loads is not proof the account belongs \
             to the same person.",
            88,
        ),
        KnowledgeEntry::new(
            "phone",
            &["phone", "mobile number", "country code"],
            "The phone tool strips formatting and infers the country from the calling prefix \
             (1 for US/Canada, 44 for the UK, 91 for India). It does not identify carriers or owners.",
            85,
        ),
        KnowledgeEntry::new(
            "email",
            &["email", "e-mail", "mailbox"],
            "For an email address, start with the breach check, then look at the domain with \
             WHOIS and DNS. MX records reveal the mail provider.",
            84,
        ),
        KnowledgeEntry::new(
            "osint_framework",
            &["osint framework", "osint", "reconnaissance", "recon"],
            "The OSINT Framework is a categorized directory of free investigation tools. Use \
             it when none of the built-in panels cover your target type.",
            82,
        ),
        KnowledgeEntry::new(
            "nmap",
            &["nmap", "port scan", "open ports", "scan"],
            "Nmap is linked for documentation only. Scan hosts only with explicit permission \
             from their owner.",
            80,
        ),
        KnowledgeEntry::new(
            "export",
            &["export", "download", "save results"],
            "Use the export command to download this conversation as JSON, including every \
             message, its timestamp and which provider answered it.",
            80,
        ),
    ]
}
