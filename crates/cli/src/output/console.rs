use cloudmap_domain::DomainReport;
use colored::Colorize;

/// One line per address, or one failure line when the lookup failed.
pub fn format_report(report: &DomainReport) -> Vec<String> {
    let lookup = &report.lookup;

    if let Some(failure) = &lookup.error {
        let line = format!(
            "[!] Lookup failed | Domain: {} | Nameserver: {} | Error: {}",
            lookup.domain, lookup.nameserver, failure
        );
        return vec![line.yellow().bold().to_string()];
    }

    report
        .classifications
        .iter()
        .map(|c| match &c.provider {
            Some(provider) => format!(
                "[+] Is Cloud Service: true | Service: {} | IP: {} | Domain: {}",
                provider, c.address, lookup.domain
            )
            .green()
            .bold()
            .to_string(),
            None => format!(
                "[-] Is Cloud Service: false | IP: {} | Domain: {}",
                c.address, lookup.domain
            )
            .red()
            .bold()
            .to_string(),
        })
        .collect()
}

pub fn print_report(report: &DomainReport) {
    for line in format_report(report) {
        println!("{line}");
    }
}
