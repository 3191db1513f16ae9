//! The embedded stylesheet of generated documents.
//!
//! A fixed, static string; never derived from user input. Covers
//! typography, spacing and responsive breakpoints for the container,
//! heading, category breadcrumb and inline content (images, figures,
//! captions, links).

pub const STYLESHEET: &str = r#"
        body {
            font-family: 'Inter', sans-serif;
            margin: 0;
            padding: 0;
            background-color: #f3f4f6; /* Tailwind gray-100 */
            color: #1f2937; /* Tailwind gray-800 */
            line-height: 1.6;
        }
        .container {
            max-width: 800px; /* 畫面寬度為800 */
            margin: 0 auto;
            padding: 1rem; /* p-4 */
            background-color: #ffffff; /* bg-white */
            /* box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06); /* Removed shadow for no side borders */
            border-radius: 0.5rem; /* rounded-lg */
        }
        .category-wrapper {
            margin-bottom: 0.5rem; /* mb-2 */
            text-align: left; /* Default alignment */
        }
        .category-wrapper a {
            color: #3b82f6; /* Tailwind blue-500 */
            text-decoration: none;
            transition: color 0.2s ease-in-out;
        }
        .category-wrapper a:hover {
            color: #2563eb; /* Tailwind blue-600 */
        }
        .cat-part-main {
            font-size: 1.25rem; /* text-xl */
            font-weight: 700; /* font-bold */
            color: #1f2937; /* Tailwind gray-800 */
            display: inline; /* Ensure it stays inline */
        }
        .cat-part-sub {
            font-size: 1rem; /* text-base */
            font-weight: 600; /* font-semibold */
            color: #4b5563; /* Tailwind gray-600 */
            display: inline; /* Ensure it stays inline */
        }
        .title {
            font-size: 2.25rem; /* text-4xl */
            font-weight: 700; /* font-bold */
            margin-bottom: 1rem; /* mb-4 */
            color: #1f2937; /* Tailwind gray-800 */
        }
        .content {
            font-size: 1rem; /* text-base */
            line-height: 1.75; /* leading-relaxed */
        }
        .content p {
            margin-bottom: 1rem;
        }
        .content strong, .content b {
            font-weight: 700; /* font-bold */
        }
        .content em, .content i {
            font-style: italic;
        }
        .content u {
            text-decoration: underline;
        }
        .content img {
            max-width: 100%; /* Ensure images are responsive within their container */
            max-height: 600px; /* 圖寬MAX600 */
            height: auto;
            display: block; /* Make image a block element for margin: auto to work */
            margin: 1rem auto; /* Center images and add vertical margin */
            border-radius: 0.5rem; /* rounded-lg */
            box-shadow: 0 1px 3px 0 rgba(0, 0, 0, 0.1), 0 1px 2px 0 rgba(0, 0, 0, 0.06); /* shadow-sm */
        }
        .content figure {
            margin: 1rem 0; /* Add margin for figures */
            text-align: center; /* Center content within figure, including figcaption */
        }
        .content figcaption {
            font-size: 0.875rem; /* text-sm, smaller font for caption */
            color: #6b7280; /* Tailwind gray-500 */
            margin-top: 0.5rem; /* mt-2 */
            text-align: center; /* Ensure caption is centered */
        }
        .content a {
            color: #3b82f6; /* Tailwind blue-500 */
            text-decoration: underline;
        }

        /* Responsive adjustments for tablets and mobile phones */
        @media (max-width: 768px) { /* md breakpoint */
            .container {
                padding: 0.75rem; /* p-3 */
            }
            .title {
                font-size: 1.75rem; /* text-3xl */
            }
            .cat-part-main {
                font-size: 1.125rem; /* text-lg */
            }
            .cat-part-sub {
                font-size: 0.875rem; /* text-sm */
            }
        }
        @media (max-width: 640px) { /* sm breakpoint */
            .container {
                padding: 0.5rem; /* p-2 */
            }
            .title {
                font-size: 1.5rem; /* text-2xl */
            }
            .cat-part-main {
                font-size: 1rem; /* text-base */
            }
            .cat-part-sub {
                font-size: 0.75rem; /* text-xs */
            }
        }
    "#;
