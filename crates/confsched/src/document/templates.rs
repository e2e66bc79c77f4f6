//! Built-in LaTeX preambles.
//!
//! Each preamble stops just before `\begin{document}`; the body is written by
//! the matching `render_*` function. Item files are expected to use
//! `\abstract{title}{speaker}{level}{body}`, which every preamble defines.

/// Preamble for one abstract per document, later cropped to its content.
pub const SINGLE: &str = r"\documentclass[12pt]{article}
\usepackage{cmap}
\usepackage[utf8]{inputenc}
\usepackage{amsmath,amssymb}
\usepackage[T1]{fontenc}
\usepackage{fbb}
\usepackage{ragged2e}

\newcommand{\abstracttitle}[1]{\textbf{#1}}
\newcommand{\abstractlevel}[1]{\textrm{This talk is Level~#1}}
\newcommand{\abstractspeaker}[1]{\textsc{#1}}

% #1 title, #2 speaker, #3 level, #4 body
\renewcommand{\abstract}[4]{%
   \begin{center} \abstracttitle{#1} \end{center}
   \begin{center} \abstractspeaker{#2} \end{center}
   \begin{center} \abstractlevel{#3} \end{center}
   \noindent #4
}
\pagestyle{empty}
";

/// Preamble for the master list of every abstract.
pub const MASTER: &str = r"\documentclass[11pt]{article}
\usepackage{cmap}
\usepackage[utf8]{inputenc}
\usepackage{amsmath,amssymb}
\usepackage[T1]{fontenc}
\usepackage{fbb}
\usepackage[top=0.5in,bottom=0.75in,right=0.5in]{geometry}
\usepackage{ragged2e}

\newcommand{\abstracttitle}[1]{\textbf{#1}}
\newcommand{\abstractlevel}[1]{\textrm{(Level~#1)}}
\newcommand{\abstractspeaker}[1]{\textsc{#1}}

% #1 title, #2 speaker, #3 level, #4 body
\renewcommand{\abstract}[4]{%
   \abstracttitle{#1} \\
   \abstractlevel{#3}
   \abstractspeaker{#2} \\
   \noindent #4
}
\pagestyle{plain}
";

/// Preamble for the room signage: one section per room, talks by title.
pub const ROOMS: &str = r"\documentclass[14pt]{extarticle}
\usepackage{cmap}
\usepackage[utf8]{inputenc}
\usepackage{amsmath,amssymb}
\usepackage[T1]{fontenc}
\usepackage{fbb}
\usepackage[margin=0.75in]{geometry}
\usepackage{ragged2e}

\newcommand{\abstracttitle}[1]{\textbf{#1}}
\newcommand{\abstractspeaker}[1]{\textsc{#1}}
\renewcommand{\abstract}[4]{\abstracttitle{#1}\\ \abstractspeaker{#2}}

\newcommand{\roomsection}[1]{\begin{center}{\Huge\bfseries Room~#1}\end{center}\bigskip}
\newcommand{\grouphead}[1]{\par\bigskip\begin{center}{\LARGE Session~#1}\end{center}\medskip}
\newcommand{\roomsession}[3]{\par\medskip\noindent{\Large\bfseries #1}\hfill Chair:~#3\par\smallskip}
\newcommand{\talkslot}[2]{\par\noindent\makebox[7em][l]{#1}%
   \parbox[t]{\dimexpr\linewidth-7em\relax}{#2}\par\smallskip}
\pagestyle{empty}
";

/// Preamble for the chair packets: room signage plus standing instructions.
pub const CHAIRS: &str = r"\documentclass[12pt]{article}
\usepackage{cmap}
\usepackage[utf8]{inputenc}
\usepackage{amsmath,amssymb}
\usepackage[T1]{fontenc}
\usepackage{fbb}
\usepackage[margin=0.75in]{geometry}
\usepackage{ragged2e}

\newcommand{\abstracttitle}[1]{\textbf{#1}}
\newcommand{\abstractspeaker}[1]{\textsc{#1}}
\renewcommand{\abstract}[4]{\abstracttitle{#1}\\ \abstractspeaker{#2}}

\newcommand{\roomsection}[1]{\begin{center}{\LARGE\bfseries Chair packet for Room~#1}\end{center}\bigskip}
\newcommand{\grouphead}[1]{\par\medskip\begin{center}{\Large Session~#1}\end{center}\smallskip}
\newcommand{\roomsession}[3]{\par\medskip\noindent{\large\bfseries #1}\hfill Chair:~#3\par\smallskip}
\newcommand{\talkslot}[2]{\par\noindent\makebox[7em][l]{#1}%
   \parbox[t]{\dimexpr\linewidth-7em\relax}{#2}\par\smallskip}

% #1 session, #2 room, #3 chair
\newcommand{\chairblock}[3]{%
   \par\medskip\noindent\textbf{#3, thank you for chairing #1 in Room~#2.}
   \begin{itemize}
      \item Introduce each speaker by name and talk title.
      \item Keep every talk to its slot: signal five minutes and one minute before the end.
      \item Leave time for questions, then start the next talk on schedule even if a speaker is absent.
   \end{itemize}
   \medskip\noindent{\Large\bfseries Schedule for #1}\par\smallskip}
\pagestyle{empty}
";
