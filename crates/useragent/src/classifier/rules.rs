//! 분류 규칙 테이블
//!
//! 두 테이블 모두 위에서부터 순서대로 시도하며 첫 번째 매칭이 이깁니다.
//! 순서가 곧 우선순위이므로 항목을 정렬하거나 합치지 않습니다.
//! 브라우저 규칙의 첫 번째 캡처 그룹이 버전입니다.

/// 검색 봇 규칙 이름. 매칭되면 이름·버전·OS 없이 `Bot`으로 분류합니다.
pub(crate) const SEARCHBOT: &str = "searchbot";

/// 브라우저 규칙 한 줄
pub(crate) struct BrowserRuleSpec {
    /// 브라우저 이름 (속성 값으로 그대로 기록)
    pub name: &'static str,
    /// 정규식 패턴
    pub pattern: &'static str,
    /// 매칭 위치 이후에 이 토큰이 나오면 해당 매칭을 버립니다.
    pub reject_if_followed_by: Option<&'static str>,
}

const fn rule(name: &'static str, pattern: &'static str) -> BrowserRuleSpec {
    BrowserRuleSpec {
        name,
        pattern,
        reject_if_followed_by: None,
    }
}

pub(crate) const BROWSER_RULES: &[BrowserRuleSpec] = &[
    rule("aol", r"AOLShield/([0-9._]+)"),
    rule("edge", r"Edge/([0-9._]+)"),
    rule("edge-ios", r"EdgiOS/([0-9._]+)"),
    rule("yandexbrowser", r"YaBrowser/([0-9._]+)"),
    rule("kakaotalk", r"KAKAOTALK\s([0-9.]+)"),
    rule("samsung", r"SamsungBrowser/([0-9.]+)"),
    rule("silk", r"\bSilk/([0-9._-]+)\b"),
    rule("miui", r"MiuiBrowser/([0-9.]+)$"),
    rule("beaker", r"BeakerBrowser/([0-9.]+)"),
    rule("edge-chromium", r"EdgA?/([0-9.]+)"),
    rule(
        "chromium-webview",
        r"wv\).*Chrom(?:e|ium)/([0-9.]+)(:?\s|$)",
    ),
    // Opera는 Chrome 토큰 뒤에 OPR/을 붙이므로 opera 규칙에 넘깁니다.
    BrowserRuleSpec {
        name: "chrome",
        pattern: r"Chrom(?:e|ium)/([0-9.]+)(:?\s|$)",
        reject_if_followed_by: Some("OPR"),
    },
    rule("phantomjs", r"PhantomJS/([0-9.]+)(:?\s|$)"),
    rule("crios", r"CriOS/([0-9.]+)(:?\s|$)"),
    rule("firefox", r"Firefox/([0-9.]+)(?:\s|$)"),
    rule("fxios", r"FxiOS/([0-9.]+)"),
    rule("opera-mini", r"Opera Mini.*Version/([0-9.]+)"),
    rule("opera", r"Opera/([0-9.]+)(?:\s|$)"),
    rule("opera", r"OPR/([0-9.]+)(:?\s|$)"),
    rule("pie", r"^Microsoft Pocket Internet Explorer/(\d+\.\d+)$"),
    rule(
        "pie",
        r"^Mozilla/\d\.\d+\s\(compatible;\s(?:MSP?IE|MSInternet Explorer) (\d+\.\d+);.*Windows CE.*\)$",
    ),
    rule("netfront", r"^Mozilla/\d\.\d+.*NetFront/(\d.\d)"),
    rule("ie", r"Trident/7\.0.*rv:([0-9.]+).*\).*Gecko$"),
    rule("ie", r"MSIE\s([0-9.]+);.*Trident/[4-7].0"),
    rule("ie", r"MSIE\s(7\.0)"),
    rule("bb10", r"BB10;\sTouch.*Version/([0-9.]+)"),
    rule("android", r"Android\s([0-9.]+)"),
    rule("ios", r"Version/([0-9._]+).*Mobile.*Safari.*"),
    rule("safari", r"Version/([0-9._]+).*Safari"),
    rule("facebook", r"FB[AS]V/([0-9.]+)"),
    rule("instagram", r"Instagram\s([0-9.]+)"),
    rule("ios-webview", r"AppleWebKit/([0-9.]+).*Mobile"),
    rule("ios-webview", r"AppleWebKit/([0-9.]+).*Gecko\)$"),
    rule("curl", r"^curl/([0-9.]+)$"),
    rule(
        SEARCHBOT,
        r"alexa|bot|crawl(er|ing)|facebookexternalhit|feedburner|google web preview|nagios|postrank|pingdom|slurp|spider|yahoo!|yandex",
    ),
];

/// 브라우저로 매칭되었지만 실제로는 크롤러인 UA를 식별합니다 (`BotDevice`).
pub(crate) const BOT_DEVICE_PATTERN: &str =
    r"(nuhk|curl|Googlebot|Yammybot|Openbot|Slurp|MSNBot|Ask Jeeves/Teoma|ia_archiver)";

pub(crate) const OS_RULES: &[(&str, &str)] = &[
    ("iOS", r"iP(hone|od|ad)"),
    ("Android OS", r"Android"),
    ("BlackBerry OS", r"BlackBerry|BB10"),
    ("Windows Mobile", r"IEMobile"),
    ("Amazon OS", r"Kindle"),
    ("Windows 3.11", r"Win16"),
    ("Windows 95", r"(Windows 95)|(Win95)|(Windows_95)"),
    ("Windows 98", r"(Windows 98)|(Win98)"),
    ("Windows 2000", r"(Windows NT 5.0)|(Windows 2000)"),
    ("Windows XP", r"(Windows NT 5.1)|(Windows XP)"),
    ("Windows Server 2003", r"(Windows NT 5.2)"),
    ("Windows Vista", r"(Windows NT 6.0)"),
    ("Windows 7", r"(Windows NT 6.1)"),
    ("Windows 8", r"(Windows NT 6.2)"),
    ("Windows 8.1", r"(Windows NT 6.3)"),
    ("Windows 10", r"(Windows NT 10.0)"),
    ("Windows ME", r"Windows ME"),
    (
        "Windows CE",
        r"Windows CE|WinCE|Microsoft Pocket Internet Explorer",
    ),
    ("Open BSD", r"OpenBSD"),
    ("Sun OS", r"SunOS"),
    ("Chrome OS", r"CrOS"),
    ("Linux", r"(Linux)|(X11)"),
    ("Mac OS", r"(Mac_PowerPC)|(Macintosh)"),
    ("QNX", r"QNX"),
    ("BeOS", r"BeOS"),
    ("OS/2", r"OS/2"),
];
