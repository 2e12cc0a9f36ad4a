//! Path-query tests over the JSON source.
//!
//! Exercises the full grammar against realistic documents: dotted lookups,
//! array wildcards and counts, nested-array unrolling, and the object
//! iteration forms.

use confer::{JsonSource, Source};

const CARS_DOC: &[u8] = r#"{
    "test": "ololo",
    "meow": [
        "purpur",
        "furfur"
    ],
    "тачки": [
        {
            "модель": "vaz",
            "год": 1995,
            "владельцы": [
                "Иванов",
                "Петров В."
            ]
        },
        {
            "модель": "gaz",
            "год": 1986,
            "владельцы": [
                "Сидоров-Пражский",
                "Жужелица А.В.",
                "П. Лут"
            ]
        }
    ],
    "Владельцы": {
        "Иванов": {
            "Город": "Москва",
            "Ник": "wado"
        },
        "Сидоров-Пражский": {
            "Город": "Калуга",
            "Ник": "sidor"
        },
        "П. Лут": {
            "Город": "Усть-Каменогорск",
            "Ник": "pluto"
        }
    }
}"#.as_bytes();

const EVENT_DOC: &[u8] = r#"{
  "Направление": "ФНС",
  "ИдПакетаДокументов": "09e3968080fd447aa56954b34872f9f1",
  "Документы": [
    {
      "ТипДокумента": "документ",
      "ИдФайла": "09e3968080fd447aa56954b34872f9f1/f13e7bb93f654790bb4129c18ad15346",
      "Подписи": [
        {
          "ИдФайла": "09e3968080fd447aa56954b34872f9f1/39d19ae2ddec4b98af57e60487c69a9c",
          "Присоединенная": false
        }
      ]
    },
    {
      "ТипДокумента": "приложение",
      "ИдФайла": "09e3968080fd447aa56954b34872f9f1/45e7897b885a47248a792eb0e14845a1",
      "Подписи": [
        {
          "ИдФайла": "09e3968080fd447aa56954b34872f9f1/024a426f619745f3a3ddb1a3ba9e2012",
          "Присоединенная": false
        }
      ]
    },
    {
      "ТипДокумента": "описание",
      "ИдФайла": "09e3968080fd447aa56954b34872f9f1/1df72c432b654ac980f9e4a91fc1b662",
      "Подписи": [
        {
          "ИдФайла": "09e3968080fd447aa56954b34872f9f1/4c3577b9e4b64a7eb42d9162bf98ca4d",
          "Присоединенная": false
        }
      ]
    }
  ]
}"#.as_bytes();

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn dotted_lookups_and_wildcards() {
    let source = JsonSource::new(CARS_DOC);

    assert_eq!(source.get("test"), "ololo");
    assert_eq!(source.get("тачки.0.владельцы.1"), "Петров В.");
    assert_eq!(
        source.get_array("meow"),
        Some(strings(&["purpur", "furfur"]))
    );
    assert_eq!(
        source.get_array("тачки.#.модель"),
        Some(strings(&["vaz", "gaz"]))
    );
    assert_eq!(
        source.get_array("тачки.#.год"),
        Some(strings(&["1995", "1986"]))
    );
}

#[test]
fn trailing_wildcard_counts_while_plain_path_unrolls() {
    let source = JsonSource::new(CARS_DOC);

    assert_eq!(
        source.get_array("тачки.#.владельцы.#"),
        Some(strings(&["2", "3"]))
    );
    assert_eq!(
        source.get_array("тачки.#.владельцы"),
        Some(strings(&[
            "Иванов",
            "Петров В.",
            "Сидоров-Пражский",
            "Жужелица А.В.",
            "П. Лут",
        ]))
    );
}

#[test]
fn object_iteration_walks_values_in_insertion_order() {
    let source = JsonSource::new(CARS_DOC);

    assert_eq!(
        source.get_array("Владельцы.$.Город"),
        Some(strings(&["Москва", "Калуга", "Усть-Каменогорск"]))
    );
    assert_eq!(
        source.get_array("Владельцы.@"),
        Some(strings(&["Иванов", "Сидоров-Пражский", "П. Лут"]))
    );
    assert_eq!(
        source.get_array("Владельцы.0.Город"),
        None
    );
}

#[test]
fn object_values_suffix_flattens_each_value() {
    let source = JsonSource::new(br#"{"m": {"a": 1, "b": [2, 3]}}"#);
    assert_eq!(source.get_array("m.$"), Some(strings(&["1", "2", "3"])));
}

#[test]
fn suffix_forms_do_not_apply_to_arrays() {
    let source = JsonSource::new(CARS_DOC);
    assert_eq!(source.get_array("meow.$"), None);
    assert_eq!(source.get_array("meow.@"), None);
}

#[test]
fn deep_wildcard_chains_resolve_in_document_order() {
    let source = JsonSource::new(EVENT_DOC);

    assert_eq!(
        source.get_array("Документы.#.Подписи.#.ИдФайла"),
        Some(strings(&[
            "09e3968080fd447aa56954b34872f9f1/39d19ae2ddec4b98af57e60487c69a9c",
            "09e3968080fd447aa56954b34872f9f1/024a426f619745f3a3ddb1a3ba9e2012",
            "09e3968080fd447aa56954b34872f9f1/4c3577b9e4b64a7eb42d9162bf98ca4d",
        ]))
    );
    assert_eq!(
        source.get("ИдПакетаДокументов"),
        "09e3968080fd447aa56954b34872f9f1"
    );
}

#[test]
fn wildcard_over_array_of_objects() {
    let source = JsonSource::new(br#"{"a": [{"x": 1}, {"x": 2}]}"#);
    assert_eq!(source.get_array("a.#.x"), Some(strings(&["1", "2"])));
    assert_eq!(source.get_array("a.$"), None);
}
