//! Month and weekday names plus default `%x`, `%X` and `%c` formats.

/// Names and default formats of one language.
#[derive(Debug)]
pub(crate) struct Locale {
    pub short_months: [&'static str; 12],
    pub long_months: [&'static str; 12],
    /// Sunday first.
    pub short_weekdays: [&'static str; 7],
    /// Sunday first.
    pub long_weekdays: [&'static str; 7],
    pub date_format: &'static str,
    pub time_format: &'static str,
    pub datetime_format: &'static str,
}

/// Position of English, the fallback, in [`LOCALES`].
const ENGLISH: usize = 1;

static LOCALES: [(&str, Locale); 21] = [
    (
        "de",
        Locale {
            short_months: ["Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez"],
            long_months: [
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ],
            short_weekdays: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
            long_weekdays: ["Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "en",
        Locale {
            short_months: ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
            long_months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            short_weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            long_weekdays: ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"],
            date_format: "%m/%d/%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %I:%M:%S %p ",
        },
    ),
    (
        "fr",
        Locale {
            short_months: [
                "janv.",
                "févr.",
                "mars",
                "avril",
                "mai",
                "juin",
                "juil.",
                "août",
                "sept.",
                "oct.",
                "nov.",
                "déc.",
            ],
            long_months: [
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
            short_weekdays: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
            long_weekdays: ["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"],
            date_format: "%d/%m/%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "es",
        Locale {
            short_months: ["ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic"],
            long_months: [
                "enero",
                "febrero",
                "marzo",
                "abril",
                "mayo",
                "junio",
                "julio",
                "agosto",
                "septiembre",
                "octubre",
                "noviembre",
                "diciembre",
            ],
            short_weekdays: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
            long_weekdays: ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"],
            date_format: "%d/%m/%y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "it",
        Locale {
            short_months: ["gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic"],
            long_months: [
                "gennaio",
                "febbraio",
                "marzo",
                "aprile",
                "maggio",
                "giugno",
                "luglio",
                "agosto",
                "settembre",
                "ottobre",
                "novembre",
                "dicembre",
            ],
            short_weekdays: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
            long_weekdays: ["domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato"],
            date_format: "%d/%m/%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "da",
        Locale {
            short_months: ["jan", "feb", "mar", "apr", "maj", "jun", "jul", "aug", "sep", "okt", "nov", "dec"],
            long_months: [
                "januar",
                "februar",
                "marts",
                "april",
                "maj",
                "juni",
                "juli",
                "august",
                "september",
                "oktober",
                "november",
                "december",
            ],
            short_weekdays: ["søn", "man", "tir", "ons", "tor", "fre", "lør"],
            long_weekdays: ["søndag", "mandag", "tirsdag", "onsdag", "torsdag", "fredag", "lørdag"],
            date_format: "%d-%m-%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "sv",
        Locale {
            short_months: ["jan", "feb", "mar", "apr", "maj", "jun", "jul", "aug", "sep", "okt", "nov", "dec"],
            long_months: [
                "januari",
                "februari",
                "mars",
                "april",
                "maj",
                "juni",
                "juli",
                "augusti",
                "september",
                "oktober",
                "november",
                "december",
            ],
            short_weekdays: ["sön", "mån", "tis", "ons", "tor", "fre", "lör"],
            long_weekdays: ["söndag", "måndag", "tisdag", "onsdag", "torsdag", "fredag", "lördag"],
            date_format: "%Y-%m-%d",
            time_format: "%H.%M.%S",
            datetime_format: "%a %d %b %Y %H.%M.%S",
        },
    ),
    (
        "nl",
        Locale {
            short_months: ["jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec"],
            long_months: [
                "januari",
                "februari",
                "maart",
                "april",
                "mei",
                "juni",
                "juli",
                "augustus",
                "september",
                "oktober",
                "november",
                "december",
            ],
            short_weekdays: ["zo", "ma", "di", "wo", "do", "vr", "za"],
            long_weekdays: ["zondag", "maandag", "dinsdag", "woensdag", "donderdag", "vrijdag", "zaterdag"],
            date_format: "%d-%m-%y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "pt",
        Locale {
            short_months: ["Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez"],
            long_months: [
                "Janeiro",
                "Fevereiro",
                "Março",
                "Abril",
                "Maio",
                "Junho",
                "Julho",
                "Agosto",
                "Setembro",
                "Outubro",
                "Novembro",
                "Dezembro",
            ],
            short_weekdays: ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"],
            long_weekdays: ["Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado"],
            date_format: "%d-%m-%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "cs",
        Locale {
            short_months: ["led", "úno", "bře", "dub", "kvě", "čen", "čec", "srp", "zář", "říj", "lis", "pro"],
            long_months: [
                "leden",
                "únor",
                "březen",
                "duben",
                "květen",
                "červen",
                "červenec",
                "srpen",
                "září",
                "říjen",
                "listopad",
                "prosinec",
            ],
            short_weekdays: ["Ne", "Po", "Út", "St", "Čt", "Pá", "So"],
            long_weekdays: ["Neděle", "Pondělí", "Úterý", "Středa", "Čtvrtek", "Pátek", "Sobota"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a\u{a0}%d.\u{a0}%B\u{a0}%Y,\u{a0}%H:%M:%S",
        },
    ),
    (
        "sk",
        Locale {
            short_months: ["jan", "feb", "mar", "apr", "máj", "jún", "júl", "aug", "sep", "okt", "nov", "dec"],
            long_months: [
                "január",
                "február",
                "marec",
                "apríl",
                "máj",
                "jún",
                "júl",
                "august",
                "september",
                "október",
                "november",
                "december",
            ],
            short_weekdays: ["Ne", "Po", "Ut", "St", "Št", "Pi", "So"],
            long_weekdays: ["Nedeľa", "Pondelok", "Utorok", "Streda", "Štvrtok", "Piatok", "Sobota"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a\u{a0}%d.\u{a0}%B\u{a0}%Y,\u{a0}%H:%M:%S",
        },
    ),
    (
        "pl",
        Locale {
            short_months: ["sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru"],
            long_months: [
                "styczeń",
                "luty",
                "marzec",
                "kwiecień",
                "maj",
                "czerwiec",
                "lipiec",
                "sierpień",
                "wrzesień",
                "październik",
                "listopad",
                "grudzień",
            ],
            short_weekdays: ["nie", "pon", "wto", "śro", "czw", "pią", "sob"],
            long_weekdays: ["niedziela", "poniedziałek", "wtorek", "środa", "czwartek", "piątek", "sobota"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a, %d %b %Y, %H:%M:%S",
        },
    ),
    (
        "hr",
        Locale {
            short_months: ["Sij", "Vel", "Ožu", "Tra", "Svi", "Lip", "Srp", "Kol", "Ruj", "Lis", "Stu", "Pro"],
            long_months: [
                "Siječanj",
                "Veljača",
                "Ožujak",
                "Travanj",
                "Svibanj",
                "Lipanj",
                "Srpanj",
                "Kolovoz",
                "Rujan",
                "Listopad",
                "Studeni",
                "Prosinac",
            ],
            short_weekdays: ["Ned", "Pon", "Uto", "Sri", "Čet", "Pet", "Sub"],
            long_weekdays: ["Nedjelja", "Ponedjeljak", "Utorak", "Srijeda", "Četvrtak", "Petak", "Subota"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "sr",
        Locale {
            short_months: ["јан", "феб", "мар", "апр", "мај", "јун", "јул", "авг", "сеп", "окт", "нов", "дец"],
            long_months: [
                "јануар",
                "фебруар",
                "март",
                "април",
                "мај",
                "јун",
                "јул",
                "август",
                "септембар",
                "октобар",
                "новембар",
                "децембар",
            ],
            short_weekdays: ["нед", "пон", "уто", "сре", "чет", "пет", "суб"],
            long_weekdays: ["недеља", "понедељак", "уторак", "среда", "четвртак", "петак", "субота"],
            date_format: "%d.%m.%Y.",
            time_format: "%H:%M:%S",
            datetime_format: "%A, %d. %B %Y. %H:%M:%S",
        },
    ),
    (
        "ro",
        Locale {
            short_months: ["ian", "feb", "mar", "apr", "mai", "iun", "iul", "aug", "sep", "oct", "nov", "dec"],
            long_months: [
                "ianuarie",
                "februarie",
                "martie",
                "aprilie",
                "mai",
                "iunie",
                "iulie",
                "august",
                "septembrie",
                "octombrie",
                "noiembrie",
                "decembrie",
            ],
            short_weekdays: ["Du", "Lu", "Ma", "Mi", "Jo", "Vi", "Sb"],
            long_weekdays: ["duminică", "luni", "marţi", "miercuri", "joi", "vineri", "sâmbătă"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "hu",
        Locale {
            short_months: [
                "jan",
                "febr",
                "márc",
                "ápr",
                "máj",
                "jún",
                "júl",
                "aug",
                "szept",
                "okt",
                "nov",
                "dec",
            ],
            long_months: [
                "január",
                "február",
                "március",
                "április",
                "május",
                "június",
                "július",
                "augusztus",
                "szeptember",
                "október",
                "november",
                "december",
            ],
            short_weekdays: ["v", "h", "k", "sze", "cs", "p", "szo"],
            long_weekdays: ["vasárnap", "hétfő", "kedd", "szerda", "csütörtök", "péntek", "szombat"],
            date_format: "%Y-%m-%d",
            time_format: "%H.%M.%S",
            datetime_format: "%Y. %b. %d., %A, %H.%M.%S",
        },
    ),
    (
        "tr",
        Locale {
            short_months: ["Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara"],
            long_months: [
                "Ocak",
                "Şubat",
                "Mart",
                "Nisan",
                "Mayıs",
                "Haziran",
                "Temmuz",
                "Ağustos",
                "Eylül",
                "Ekim",
                "Kasım",
                "Aralık",
            ],
            short_weekdays: ["Paz", "Pzt", "Sal", "Çrş", "Prş", "Cum", "Cts"],
            long_weekdays: ["Pazar", "Pazartesi", "Salı", "Çarşamba", "Perşembe", "Cuma", "Cumartesi"],
            date_format: "%d-%m-%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "ru",
        Locale {
            short_months: ["Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек"],
            long_months: [
                "Январь",
                "Февраль",
                "Март",
                "Апрель",
                "Май",
                "Июнь",
                "Июль",
                "Август",
                "Сентябрь",
                "Октябрь",
                "Ноябрь",
                "Декабрь",
            ],
            short_weekdays: ["Вск", "Пнд", "Втр", "Срд", "Чтв", "Птн", "Сбт"],
            long_weekdays: ["Воскресенье", "Понедельник", "Вторник", "Среда", "Четверг", "Пятница", "Суббота"],
            date_format: "%d.%m.%Y",
            time_format: "%H:%M:%S",
            datetime_format: "%a %d %b %Y %H:%M:%S",
        },
    ),
    (
        "zh",
        Locale {
            short_months: [" 1月", " 2月", " 3月", " 4月", " 5月", " 6月", " 7月", " 8月", " 9月", "10月", "11月", "12月"],
            long_months: ["一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月", "十二月"],
            short_weekdays: ["日", "一", "二", "三", "四", "五", "六"],
            long_weekdays: ["星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六"],
            date_format: "%Y年%b%d日",
            time_format: "%H时%M分%S秒",
            datetime_format: "%Y年%b%d日 %A %H时%M分%S秒",
        },
    ),
    (
        "ko",
        Locale {
            short_months: [" 1월", " 2월", " 3월", " 4월", " 5월", " 6월", " 7월", " 8월", " 9월", "10월", "11월", "12월"],
            long_months: ["1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월"],
            short_weekdays: ["일", "월", "화", "수", "목", "금", "토"],
            long_weekdays: ["일요일", "월요일", "화요일", "수요일", "목요일", "금요일", "토요일"],
            date_format: "%Y년 %B %d일",
            time_format: "%H시 %M분 %S초",
            datetime_format: "%Y년 %B %d일 (%a) %p %I시 %M분 %S초",
        },
    ),
    (
        "ja",
        Locale {
            short_months: [" 1月", " 2月", " 3月", " 4月", " 5月", " 6月", " 7月", " 8月", " 9月", "10月", "11月", "12月"],
            long_months: ["1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月"],
            short_weekdays: ["日", "月", "火", "水", "木", "金", "土"],
            long_weekdays: ["日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日"],
            date_format: "%Y年%B%d日",
            time_format: "%H時%M分%S秒",
            datetime_format: "%Y年%B%d日 %H時%M分%S秒",
        },
    ),
];

fn find(lang: &str) -> Option<&'static Locale> {
    LOCALES
        .iter()
        .find(|(name, _)| *name == lang)
        .map(|(_, locale)| locale)
}

/// Locale for a language tag such as `de`, `de_AT` or `EN`.
///
/// Tries the lower-cased tag, then the part before the first `_`, then
/// English.
pub(crate) fn resolve(lang: Option<&str>) -> &'static Locale {
    let Some(lang) = lang else {
        return &LOCALES[ENGLISH].1;
    };
    let lang = lang.to_lowercase();
    find(&lang)
        .or_else(|| lang.split('_').next().and_then(find))
        .unwrap_or(&LOCALES[ENGLISH].1)
}

/// Supported language tags.
#[cfg(test)]
pub(crate) fn languages() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|(name, _)| *name)
}
