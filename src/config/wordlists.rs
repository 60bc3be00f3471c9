// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 默认的常见目录与文件列表
pub const DEFAULT_BRUTE_LIST: &[&str] = &[
    ".htaccess",
    ".htpasswd",
    ".meta",
    ".web",
    "access.log",
    "access_log",
    "admin",
    "about",
    "administrator",
    "awstats.pl",
    "cfappman",
    "cfdocs",
    "cgi",
    "cgi-bin",
    "cgi-pub",
    "cgi-script",
    "clients",
    "company",
    "cpanel",
    "crossdomain.xml",
    "dummy",
    "elmah.axd",
    "error",
    "error.log",
    "error_log",
    "forums",
    "global.inc",
    "guest",
    "guestbook",
    "help",
    "htdocs",
    "httpd",
    "httpd.pid",
    "icons",
    "iisadmin",
    "inc",
    "inc/config.php",
    "index.html",
    "index.html~",
    "index.html.bak",
    "lists",
    "login",
    "logs",
    "mambo",
    "manual",
    "phf",
    "php.ini",
    "phpinfo.php",
    "printenv",
    "profile.php",
    "public",
    "robots.txt",
    "scripts",
    "server-info",
    "servlet",
    "server-status",
    "services",
    "sitemap.xml",
    "sitemap.xml.gz",
    "status",
    "test",
    "test-cgi",
    "tiki",
    "test.php",
    "tmp",
    "tsweb",
    "trace.axd",
    "webmail",
    "wp-admin",
    "x.aspx?aspxerrorpath=",
    "~bin",
    "~ftp",
    "~nobody",
    "~root",
    "_vti_bin",
    "jmx-console",
    "web-console",
    "admin-console",
];

/// 默认的常见子域名列表
pub const DEFAULT_SUBDOMAIN_LIST: &[&str] = &[
    "www", "mail", "ftp", "smtp", "pop", "imap", "webmail", "ns1", "ns2", "dns", "vpn", "remote",
    "api", "dev", "test", "staging", "stage", "qa", "uat", "admin", "portal", "intranet", "git",
    "gitlab", "jenkins", "ci", "jira", "wiki", "docs", "blog", "shop", "store", "cdn", "static",
    "assets", "img", "media", "m", "mobile", "app", "beta", "demo", "old", "new", "backup", "db",
    "mysql", "sql", "monitor", "status", "auth", "sso", "login", "secure", "owa", "exchange",
    "autodiscover", "support", "help",
];

/// URI词表变体使用的后缀
pub const URI_PERMUTATION_SUFFIXES: &[&str] = &[".bak", ".old", "~", ".orig"];

/// 子域名词表变体使用的后缀
pub const DNS_PERMUTATION_SUFFIXES: &[&str] = &["1", "2", "-dev", "-test", "-staging"];

/// 转换为拥有所有权的词表
pub fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}
