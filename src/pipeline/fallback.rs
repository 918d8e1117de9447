//! Deterministic local content used when the provider is unavailable or fails.

use crate::course::{CourseContent, CourseModule, StructuredCourse};
use rand::seq::SliceRandom;
use rand::Rng;

/// Canned study tips. Fixed for the life of the process.
pub const FALLBACK_TIPS: [&str; 8] = [
    "Estude 25min + 5min",
    "Faça 3 exercícios",
    "Revise um resumo curto",
    "Explique o conceito em voz alta com suas palavras",
    "Anote uma dúvida e pesquise só ela",
    "Refaça um exemplo sem olhar a resposta",
    "Troque de tema depois de dois blocos de estudo",
    "Termine o dia listando o que aprendeu",
];

/// Tips per fallback reply.
pub const TIPS_PER_REPLY: usize = 3;

/// Three distinct catalog tips under the echoed message, as a bulleted list.
pub fn pick_fallback_tips<R: Rng + ?Sized>(message: &str, rng: &mut R) -> String {
    let tips: Vec<&str> = FALLBACK_TIPS
        .choose_multiple(rng, TIPS_PER_REPLY)
        .copied()
        .collect();
    format!("Sobre \"{}\":\n- {}", message, tips.join("\n- "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateLanguage {
    Portuguese,
    English,
    Spanish,
}

impl TemplateLanguage {
    fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        if code.starts_with("en") {
            TemplateLanguage::English
        } else if code.starts_with("es") {
            TemplateLanguage::Spanish
        } else {
            TemplateLanguage::Portuguese
        }
    }
}

/// Four-module course template: introduction, fundamentals, guided practice, final project.
///
/// Pure in `topic` and `language`; the topic is interpolated verbatim.
pub fn build_fallback_course(topic: &str, language: &str) -> StructuredCourse {
    let t = topic;
    let (title, description, modules) = match TemplateLanguage::from_code(language) {
        TemplateLanguage::Portuguese => (
            format!("Curso de {}", t),
            format!("Trilha introdutória e prática sobre {}.", t),
            [
                (
                    format!("Introdução a {}", t),
                    format!("O que é {}, onde é usado e o que você vai construir ao final deste curso.", t),
                ),
                (
                    format!("Fundamentos de {}", t),
                    format!("Os conceitos essenciais de {} com exemplos curtos e um resumo para revisar.", t),
                ),
                (
                    format!("Prática guiada de {}", t),
                    format!("Exercícios passo a passo aplicando {} em situações do dia a dia.", t),
                ),
                (
                    format!("Projeto final de {}", t),
                    format!("Um projeto pequeno e completo que junta tudo o que você aprendeu sobre {}.", t),
                ),
            ],
        ),
        TemplateLanguage::English => (
            format!("{} Course", t),
            format!("An introductory, hands-on path through {}.", t),
            [
                (
                    format!("Introduction to {}", t),
                    format!("What {} is, where it is used, and what you will build by the end of this course.", t),
                ),
                (
                    format!("{} Fundamentals", t),
                    format!("The core concepts of {} with short examples and a summary to review.", t),
                ),
                (
                    format!("Guided {} Practice", t),
                    format!("Step-by-step exercises applying {} to everyday situations.", t),
                ),
                (
                    format!("{} Final Project", t),
                    format!("A small, complete project that brings together everything you learned about {}.", t),
                ),
            ],
        ),
        TemplateLanguage::Spanish => (
            format!("Curso de {}", t),
            format!("Ruta introductoria y práctica sobre {}.", t),
            [
                (
                    format!("Introducción a {}", t),
                    format!("Qué es {}, dónde se usa y qué vas a construir al final de este curso.", t),
                ),
                (
                    format!("Fundamentos de {}", t),
                    format!("Los conceptos esenciales de {} con ejemplos cortos y un resumen para repasar.", t),
                ),
                (
                    format!("Práctica guiada de {}", t),
                    format!("Ejercicios paso a paso aplicando {} en situaciones cotidianas.", t),
                ),
                (
                    format!("Proyecto final de {}", t),
                    format!("Un proyecto pequeño y completo que reúne todo lo que aprendiste sobre {}.", t),
                ),
            ],
        ),
    };

    StructuredCourse {
        title,
        description: Some(description),
        language: Some(language.to_string()),
        content: CourseContent {
            modules: modules
                .into_iter()
                .map(|(title, text)| CourseModule::new(title, text))
                .collect(),
        },
    }
}
