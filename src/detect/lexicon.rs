//! Built-in phrasebook for common detector classes.
//!
//! Gives the overlay a locally translated label for frequently seen objects
//! while the remote classifier has not answered yet. Coverage is the subset
//! of detector classes a learner actually points a phone at; anything else
//! stays on the placeholder until classification lands.

use crate::language::TargetLanguage;
use crate::tracker::SemanticLabel;

/// Look up a local label for a detector class.
///
/// Returns `None` when the class has no phrasebook entry. `confidence`
/// carries the detection score through so the label is comparable with
/// remote results.
pub fn local_label(
    class: &str,
    language: TargetLanguage,
    confidence: f32,
) -> Option<SemanticLabel> {
    let key = normalize_class(class);
    let translation = translation(language, &key)?;
    let (example_sentence, sentence_translation) = match example(language, &key) {
        Some((original, translated)) => (original.to_string(), translated.to_string()),
        None => {
            let (template, template_en) = default_template(language);
            (
                template.replace("OBJECT", translation),
                template_en.replace("OBJECT", &key.replace('_', " ")),
            )
        }
    };
    Some(SemanticLabel {
        object: key.replace('_', " "),
        translation: translation.to_string(),
        example_sentence,
        sentence_translation,
        confidence,
    })
}

/// Detector class names vary in casing and spacing ("cell phone",
/// "Cell_Phone"); keys are lowercase with underscores.
fn normalize_class(class: &str) -> String {
    class.trim().to_ascii_lowercase().replace(' ', "_")
}

fn translation(language: TargetLanguage, key: &str) -> Option<&'static str> {
    use TargetLanguage::*;
    let entry = match language {
        Finnish => match key {
            "bird" => "Lintu",
            "cat" => "Kissa",
            "dog" => "Koira",
            "bicycle" => "Polkupyörä",
            "car" => "Auto",
            "bus" => "Bussi",
            "chair" => "Tuoli",
            "couch" => "Sohva",
            "bed" => "Sänky",
            "tv" => "Televisio",
            "laptop" => "Kannettava tietokone",
            "keyboard" => "Näppäimistö",
            "cell_phone" => "Matkapuhelin",
            "book" => "Kirja",
            "clock" => "Kello",
            "bottle" => "Pullo",
            "cup" => "Kuppi",
            "fork" => "Haarukka",
            "knife" => "Veitsi",
            "spoon" => "Lusikka",
            "bowl" => "Kulho",
            "banana" => "Banaani",
            "apple" => "Omena",
            "backpack" => "Reppu",
            "umbrella" => "Sateenvarjo",
            _ => return None,
        },
        Russian => match key {
            "bird" => "Птица",
            "cat" => "Кошка",
            "dog" => "Собака",
            "bicycle" => "Велосипед",
            "car" => "Машина",
            "bus" => "Автобус",
            "chair" => "Стул",
            "couch" => "Диван",
            "bed" => "Кровать",
            "tv" => "Телевизор",
            "laptop" => "Ноутбук",
            "keyboard" => "Клавиатура",
            "cell_phone" => "Мобильный телефон",
            "book" => "Книга",
            "clock" => "Часы",
            "bottle" => "Бутылка",
            "cup" => "Чашка",
            "fork" => "Вилка",
            "knife" => "Нож",
            "spoon" => "Ложка",
            "bowl" => "Миска",
            "banana" => "Банан",
            "apple" => "Яблоко",
            "backpack" => "Рюкзак",
            "umbrella" => "Зонт",
            _ => return None,
        },
        French => match key {
            "bird" => "Oiseau",
            "cat" => "Chat",
            "dog" => "Chien",
            "bicycle" => "Vélo",
            "car" => "Voiture",
            "bus" => "Bus",
            "chair" => "Chaise",
            "couch" => "Canapé",
            "bed" => "Lit",
            "tv" => "Télévision",
            "laptop" => "Ordinateur portable",
            "keyboard" => "Clavier",
            "cell_phone" => "Téléphone portable",
            "book" => "Livre",
            "clock" => "Horloge",
            "bottle" => "Bouteille",
            "cup" => "Tasse",
            "fork" => "Fourchette",
            "knife" => "Couteau",
            "spoon" => "Cuillère",
            "bowl" => "Bol",
            "banana" => "Banane",
            "apple" => "Pomme",
            "backpack" => "Sac à dos",
            "umbrella" => "Parapluie",
            _ => return None,
        },
        Spanish => match key {
            "bird" => "Pájaro",
            "cat" => "Gato",
            "dog" => "Perro",
            "bicycle" => "Bicicleta",
            "car" => "Coche",
            "bus" => "Autobús",
            "chair" => "Silla",
            "couch" => "Sofá",
            "bed" => "Cama",
            "tv" => "Televisión",
            "laptop" => "Portátil",
            "keyboard" => "Teclado",
            "cell_phone" => "Teléfono móvil",
            "book" => "Libro",
            "clock" => "Reloj",
            "bottle" => "Botella",
            "cup" => "Taza",
            "fork" => "Tenedor",
            "knife" => "Cuchillo",
            "spoon" => "Cuchara",
            "bowl" => "Tazón",
            "banana" => "Plátano",
            "apple" => "Manzana",
            "backpack" => "Mochila",
            "umbrella" => "Paraguas",
            _ => return None,
        },
    };
    Some(entry)
}

fn example(language: TargetLanguage, key: &str) -> Option<(&'static str, &'static str)> {
    use TargetLanguage::*;
    let entry = match language {
        Finnish => match key {
            "cat" => ("Kissa nukkuu sohvalla.", "The cat is sleeping on the couch."),
            "dog" => ("Koira leikkii pallolla.", "The dog is playing with a ball."),
            "chair" => ("Istu tuolille.", "Sit on the chair."),
            "book" => ("Luen kirjaa.", "I am reading a book."),
            "car" => ("Auto on punainen.", "The car is red."),
            "cup" => ("Juo kupista.", "Drink from the cup."),
            "laptop" => (
                "Työskentelen kannettavalla tietokoneella.",
                "I am working on a laptop.",
            ),
            "cell_phone" => ("Missä on matkapuhelimeni?", "Where is my cell phone?"),
            _ => return None,
        },
        Russian => match key {
            "cat" => ("Кошка спит на диване.", "The cat is sleeping on the couch."),
            "dog" => ("Собака играет с мячом.", "The dog is playing with a ball."),
            "chair" => ("Сядь на стул.", "Sit on the chair."),
            "book" => ("Я читаю книгу.", "I am reading a book."),
            "car" => ("Машина красная.", "The car is red."),
            "cup" => ("Пей из чашки.", "Drink from the cup."),
            "laptop" => ("Я работаю на ноутбуке.", "I am working on a laptop."),
            "cell_phone" => ("Где мой телефон?", "Where is my cell phone?"),
            _ => return None,
        },
        French => match key {
            "cat" => ("Le chat dort sur le canapé.", "The cat is sleeping on the couch."),
            "dog" => ("Le chien joue avec une balle.", "The dog is playing with a ball."),
            "chair" => ("Asseyez-vous sur la chaise.", "Sit on the chair."),
            "book" => ("Je lis un livre.", "I am reading a book."),
            "car" => ("La voiture est rouge.", "The car is red."),
            "cup" => ("Buvez dans la tasse.", "Drink from the cup."),
            "laptop" => (
                "Je travaille sur un ordinateur portable.",
                "I am working on a laptop.",
            ),
            "cell_phone" => ("Où est mon téléphone portable?", "Where is my cell phone?"),
            _ => return None,
        },
        Spanish => match key {
            "cat" => ("El gato duerme en el sofá.", "The cat is sleeping on the couch."),
            "dog" => ("El perro juega con una pelota.", "The dog is playing with a ball."),
            "chair" => ("Siéntate en la silla.", "Sit on the chair."),
            "book" => ("Estoy leyendo un libro.", "I am reading a book."),
            "car" => ("El coche es rojo.", "The car is red."),
            "cup" => ("Bebe de la taza.", "Drink from the cup."),
            "laptop" => ("Estoy trabajando en un portátil.", "I am working on a laptop."),
            "cell_phone" => ("¿Dónde está mi teléfono móvil?", "Where is my cell phone?"),
            _ => return None,
        },
    };
    Some(entry)
}

fn default_template(language: TargetLanguage) -> (&'static str, &'static str) {
    match language {
        TargetLanguage::Finnish => ("Tämä on OBJECT.", "This is a/an OBJECT."),
        TargetLanguage::Russian => ("Это OBJECT.", "This is a/an OBJECT."),
        TargetLanguage::French => ("C'est un(e) OBJECT.", "This is a/an OBJECT."),
        TargetLanguage::Spanish => ("Esto es un(a) OBJECT.", "This is a/an OBJECT."),
    }
}
